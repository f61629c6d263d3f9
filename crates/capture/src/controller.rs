use tokio::sync::mpsc::UnboundedSender;

/// Something that happened in a capture session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// A finalized utterance.
    Transcript(String),
    /// The session stopped, for whatever reason.
    SessionEnded,
}

/// Errors from the capture side.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("capture unavailable: {0}")]
    Unavailable(String),
    #[error("capture is already listening")]
    AlreadyListening,
    #[error("capture is not listening")]
    NotListening,
}

/// The transcript producer (speech recognizer, scripted feed, ...).
///
/// Implementations report transcripts and session ends on the
/// `CaptureEvent` channel they were constructed with.
pub trait CaptureSource {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Begin a capture session.
    fn start(&mut self) -> Result<(), CaptureError>;

    /// End the current session.
    fn stop(&mut self);
}

/// Listening state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Listening,
}

/// Drives a `CaptureSource` on and off and forwards its transcripts.
///
/// While listening, a session that ends on its own is restarted right away.
/// A source that fails to start disables the controller; the failure is
/// logged once.
pub struct CaptureController {
    source: Box<dyn CaptureSource>,
    state: CaptureState,
    transcripts: UnboundedSender<String>,
    disabled: Option<String>,
}

impl CaptureController {
    pub fn new(source: Box<dyn CaptureSource>, transcripts: UnboundedSender<String>) -> Self {
        Self {
            source,
            state: CaptureState::Idle,
            transcripts,
            disabled: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state == CaptureState::Listening
    }

    /// Whether a start failure has disabled capture.
    pub fn is_disabled(&self) -> bool {
        self.disabled.is_some()
    }

    /// Idle -> Listening.
    pub fn toggle_on(&mut self) -> Result<(), CaptureError> {
        if let Some(reason) = &self.disabled {
            return Err(CaptureError::Unavailable(reason.clone()));
        }
        if self.state == CaptureState::Listening {
            return Err(CaptureError::AlreadyListening);
        }
        self.state = CaptureState::Listening;
        tracing::info!(source = self.source.name(), "capture on");
        self.start_source()
    }

    /// Listening -> Idle.
    pub fn toggle_off(&mut self) -> Result<(), CaptureError> {
        if self.state == CaptureState::Idle {
            return Err(CaptureError::NotListening);
        }
        self.state = CaptureState::Idle;
        self.source.stop();
        tracing::info!(source = self.source.name(), "capture off");
        Ok(())
    }

    /// Flip the current state. Returns the new listening flag.
    pub fn toggle(&mut self) -> Result<bool, CaptureError> {
        match self.state {
            CaptureState::Idle => self.toggle_on()?,
            CaptureState::Listening => self.toggle_off()?,
        }
        Ok(self.is_listening())
    }

    /// React to one event from the source.
    pub fn handle_event(&mut self, event: CaptureEvent) {
        match event {
            CaptureEvent::Transcript(text) => {
                let text = text.trim();
                if text.is_empty() {
                    tracing::debug!("ignoring blank transcript");
                    return;
                }
                tracing::info!(utterance = %text, "transcript");
                if self.transcripts.send(text.to_string()).is_err() {
                    tracing::warn!("classification task is gone; dropping transcript");
                }
            }
            CaptureEvent::SessionEnded => match self.state {
                CaptureState::Listening => {
                    tracing::debug!(source = self.source.name(), "session ended; restarting");
                    // the failure is already reported inside start_source
                    let _ = self.start_source();
                }
                CaptureState::Idle => {
                    tracing::trace!("session ended while idle");
                }
            },
        }
    }

    fn start_source(&mut self) -> Result<(), CaptureError> {
        match self.source.start() {
            Ok(()) => Ok(()),
            Err(err) => {
                let reason = match &err {
                    CaptureError::Unavailable(reason) => reason.clone(),
                    other => other.to_string(),
                };
                tracing::error!(source = self.source.name(), %reason, "capture unavailable; disabling");
                self.state = CaptureState::Idle;
                self.disabled = Some(reason.clone());
                Err(CaptureError::Unavailable(reason))
            }
        }
    }
}

impl std::fmt::Debug for CaptureController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureController")
            .field("source", &self.source.name())
            .field("state", &self.state)
            .field("disabled", &self.disabled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct Calls {
        starts: usize,
        stops: usize,
    }

    struct FakeSource {
        calls: Rc<RefCell<Calls>>,
        fail_after: Option<usize>,
    }

    impl CaptureSource for FakeSource {
        fn name(&self) -> &str {
            "fake"
        }
        fn start(&mut self) -> Result<(), CaptureError> {
            let mut calls = self.calls.borrow_mut();
            if self.fail_after.is_some_and(|n| calls.starts >= n) {
                return Err(CaptureError::Unavailable("no microphone".into()));
            }
            calls.starts += 1;
            Ok(())
        }
        fn stop(&mut self) {
            self.calls.borrow_mut().stops += 1;
        }
    }

    fn controller(
        fail_after: Option<usize>,
    ) -> (
        CaptureController,
        Rc<RefCell<Calls>>,
        mpsc::UnboundedReceiver<String>,
    ) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let (tx, rx) = mpsc::unbounded_channel();
        let source = FakeSource {
            calls: Rc::clone(&calls),
            fail_after,
        };
        (CaptureController::new(Box::new(source), tx), calls, rx)
    }

    #[test]
    fn starts_idle() {
        let (c, calls, _rx) = controller(None);
        assert_eq!(c.state(), CaptureState::Idle);
        assert!(!c.is_listening());
        assert_eq!(calls.borrow().starts, 0);
    }

    #[test]
    fn toggle_on_and_off() {
        let (mut c, calls, _rx) = controller(None);
        c.toggle_on().unwrap();
        assert!(c.is_listening());
        assert_eq!(calls.borrow().starts, 1);

        c.toggle_off().unwrap();
        assert!(!c.is_listening());
        assert_eq!(calls.borrow().stops, 1);
    }

    #[test]
    fn invalid_transitions_are_rejected() {
        let (mut c, calls, _rx) = controller(None);
        assert_eq!(c.toggle_off(), Err(CaptureError::NotListening));
        c.toggle_on().unwrap();
        assert_eq!(c.toggle_on(), Err(CaptureError::AlreadyListening));
        assert_eq!(calls.borrow().starts, 1);
    }

    #[test]
    fn toggle_flips_state() {
        let (mut c, _calls, _rx) = controller(None);
        assert_eq!(c.toggle(), Ok(true));
        assert_eq!(c.toggle(), Ok(false));
    }

    #[test]
    fn session_end_while_listening_restarts() {
        let (mut c, calls, _rx) = controller(None);
        c.toggle_on().unwrap();
        c.handle_event(CaptureEvent::SessionEnded);
        assert_eq!(calls.borrow().starts, 2);
        assert!(c.is_listening());

        c.toggle_off().unwrap();
        c.handle_event(CaptureEvent::SessionEnded);
        assert_eq!(calls.borrow().starts, 2);
    }

    #[test]
    fn session_end_while_idle_is_noop() {
        let (mut c, calls, _rx) = controller(None);
        c.handle_event(CaptureEvent::SessionEnded);
        assert_eq!(calls.borrow().starts, 0);
        assert!(!c.is_listening());
    }

    #[test]
    fn transcripts_are_forwarded_trimmed() {
        let (mut c, _calls, mut rx) = controller(None);
        c.toggle_on().unwrap();
        c.handle_event(CaptureEvent::Transcript("  a big red circle ".into()));
        c.handle_event(CaptureEvent::Transcript("   ".into()));
        assert_eq!(rx.try_recv().unwrap(), "a big red circle");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn start_failure_disables_capture() {
        let (mut c, calls, _rx) = controller(Some(0));
        let err = c.toggle_on().unwrap_err();
        assert_eq!(err, CaptureError::Unavailable("no microphone".into()));
        assert!(!c.is_listening());
        assert!(c.is_disabled());

        // stays disabled without touching the source again
        assert_eq!(c.toggle_on(), Err(CaptureError::Unavailable("no microphone".into())));
        assert_eq!(calls.borrow().starts, 0);
    }

    #[test]
    fn failed_restart_drops_to_idle() {
        let (mut c, calls, _rx) = controller(Some(1));
        c.toggle_on().unwrap();
        c.handle_event(CaptureEvent::SessionEnded);
        assert!(!c.is_listening());
        assert!(c.is_disabled());
        assert_eq!(calls.borrow().starts, 1);
    }
}

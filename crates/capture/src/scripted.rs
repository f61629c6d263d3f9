use crate::controller::{CaptureError, CaptureEvent, CaptureSource};
use std::collections::VecDeque;
use tokio::sync::mpsc::UnboundedSender;

/// Replays canned utterances, one per capture session.
///
/// Each `start` emits the next utterance and then ends the session, the way
/// a recognizer ends after a phrase of silence. Once the script runs out a
/// started session stays open and quiet.
#[derive(Debug)]
pub struct ScriptedCapture {
    script: VecDeque<String>,
    events: UnboundedSender<CaptureEvent>,
    sessions: usize,
}

impl ScriptedCapture {
    pub fn new(
        script: impl IntoIterator<Item = String>,
        events: UnboundedSender<CaptureEvent>,
    ) -> Self {
        Self {
            script: script.into_iter().collect(),
            events,
            sessions: 0,
        }
    }

    /// Utterances not yet delivered.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Sessions started so far.
    pub fn sessions(&self) -> usize {
        self.sessions
    }

    fn emit(&self, event: CaptureEvent) -> Result<(), CaptureError> {
        self.events
            .send(event)
            .map_err(|_| CaptureError::Unavailable("capture event channel closed".into()))
    }
}

impl CaptureSource for ScriptedCapture {
    fn name(&self) -> &str {
        "scripted"
    }

    fn start(&mut self) -> Result<(), CaptureError> {
        self.sessions += 1;
        if let Some(utterance) = self.script.pop_front() {
            self.emit(CaptureEvent::Transcript(utterance))?;
            self.emit(CaptureEvent::SessionEnded)?;
        } else {
            tracing::debug!(session = self.sessions, "script exhausted");
        }
        Ok(())
    }

    fn stop(&mut self) {
        tracing::debug!(session = self.sessions, "scripted capture stopped");
    }
}

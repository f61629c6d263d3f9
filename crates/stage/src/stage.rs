use crate::config::StageConfig;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use voxshape_capture::{
    CaptureController, CaptureError, CaptureEvent, CaptureSource, Classifier, spawn_classification,
};
use voxshape_kernel::SimulationLoop;
use voxshape_shapes::{ShapeRegistry, Surface};
use voxshape_spawn::{ShapeRequest, SpawnPipeline};

/// What happened to queued shape requests during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub spawned: usize,
    pub rejected: usize,
}

struct CaptureLink {
    controller: CaptureController,
    events: UnboundedReceiver<CaptureEvent>,
    task: JoinHandle<()>,
}

/// Owns the registry, the simulation and the capture wiring, and advances
/// them one frame at a time.
///
/// Each frame:
/// 1. handles capture events queued before the frame started,
/// 2. updates and draws every entity,
/// 3. spawns entities for classification results that arrived meanwhile.
///
/// Step 3 runs after drawing, so a new entity first appears in the next frame.
pub struct Stage {
    config: StageConfig,
    registry: ShapeRegistry,
    sim: SimulationLoop,
    pipeline: SpawnPipeline,
    requests_tx: UnboundedSender<ShapeRequest>,
    requests_rx: UnboundedReceiver<ShapeRequest>,
    capture: Option<CaptureLink>,
}

impl Stage {
    pub fn new(config: StageConfig, registry: ShapeRegistry) -> Self {
        let pipeline = SpawnPipeline::new(&config.spawn);
        let (requests_tx, requests_rx) = mpsc::unbounded_channel();
        Self {
            config,
            registry,
            sim: SimulationLoop::new(),
            pipeline,
            requests_tx,
            requests_rx,
            capture: None,
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    /// Mutable registry access for registering extra shapes.
    pub fn registry_mut(&mut self) -> &mut ShapeRegistry {
        &mut self.registry
    }

    pub fn simulation(&self) -> &SimulationLoop {
        &self.sim
    }

    /// Connect a capture source and a classifier.
    ///
    /// `events` must be the receiving end of the channel `source` reports
    /// on. Starts the classification task, so this must be called from
    /// within a `tokio::task::LocalSet`. Capture starts idle.
    pub fn attach_capture<C>(
        &mut self,
        source: Box<dyn CaptureSource>,
        events: UnboundedReceiver<CaptureEvent>,
        classifier: C,
    ) where
        C: Classifier + 'static,
    {
        let (transcripts_tx, transcripts_rx) = mpsc::unbounded_channel();
        tracing::info!(source = source.name(), classifier = classifier.name(), "capture attached");
        let task = spawn_classification(classifier, transcripts_rx, self.requests_tx.clone());
        let controller = CaptureController::new(source, transcripts_tx);
        if let Some(old) = self.capture.replace(CaptureLink {
            controller,
            events,
            task,
        }) {
            // dropping the old controller closes its transcript channel
            drop(old.controller);
            tracing::debug!(finished = old.task.is_finished(), "replaced capture link");
        }
    }

    /// Flip capture on or off. Returns whether capture is now listening.
    pub fn toggle_capture(&mut self) -> Result<bool, CaptureError> {
        match &mut self.capture {
            Some(link) => link.controller.toggle(),
            None => Err(CaptureError::Unavailable("no capture source attached".into())),
        }
    }

    pub fn is_listening(&self) -> bool {
        self.capture
            .as_ref()
            .is_some_and(|link| link.controller.is_listening())
    }

    /// Queue a shape request as if it had come from the classifier.
    pub fn submit(&self, request: ShapeRequest) {
        // the receiver lives in self, so the send cannot fail
        let _ = self.requests_tx.send(request);
    }

    /// Run one frame against `surface`.
    pub fn frame(&mut self, surface: &mut dyn Surface) -> FrameReport {
        if let Some(link) = &mut self.capture {
            let mut pending = Vec::new();
            while let Ok(event) = link.events.try_recv() {
                pending.push(event);
            }
            for event in pending {
                link.controller.handle_event(event);
            }
        }

        self.sim.frame(surface);

        let bounds = surface.bounds();
        let mut report = FrameReport::default();
        while let Ok(request) = self.requests_rx.try_recv() {
            match self
                .pipeline
                .spawn(&self.registry, &request, bounds, &mut self.sim)
            {
                Ok(_) => report.spawned += 1,
                Err(err) => {
                    report.rejected += 1;
                    tracing::warn!(%request, error = %err, "spawn aborted");
                }
            }
        }
        report
    }

    /// Run `frames` frames paced at the configured frame rate, yielding to
    /// capture and classification tasks between frames.
    pub async fn run(&mut self, surface: &mut dyn Surface, frames: u64) -> FrameReport {
        let mut interval = tokio::time::interval(self.config.frame_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut total = FrameReport::default();
        for _ in 0..frames {
            interval.tick().await;
            let report = self.frame(surface);
            total.spawned += report.spawned;
            total.rejected += report.rejected;
        }
        tracing::info!(
            frames,
            entities = self.sim.len(),
            spawned = total.spawned,
            rejected = total.rejected,
            "run finished"
        );
        total
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("shapes", &self.registry.len())
            .field("entities", &self.sim.len())
            .field("tick", &self.sim.tick())
            .field("listening", &self.is_listening())
            .finish()
    }
}

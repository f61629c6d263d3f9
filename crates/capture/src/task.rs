use crate::classify::Classifier;
use std::rc::Rc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use voxshape_spawn::ShapeRequest;

/// Start the classification task on the current `LocalSet`.
///
/// Each transcript gets its own local future, so a slow call does not delay
/// the next one. Successful requests go out on `requests`; failures are
/// logged and dropped. The task ends when the transcript sender is dropped;
/// calls already in flight still complete.
///
/// Must be called from within a `tokio::task::LocalSet`.
pub fn spawn_classification<C>(
    classifier: C,
    mut transcripts: UnboundedReceiver<String>,
    requests: UnboundedSender<ShapeRequest>,
) -> JoinHandle<()>
where
    C: Classifier + 'static,
{
    let classifier = Rc::new(classifier);
    tokio::task::spawn_local(async move {
        tracing::debug!(classifier = classifier.name(), "classification task started");
        while let Some(utterance) = transcripts.recv().await {
            let classifier = Rc::clone(&classifier);
            let requests = requests.clone();
            tokio::task::spawn_local(async move {
                match classifier.classify(&utterance).await {
                    Ok(request) => {
                        tracing::info!(%utterance, %request, "classified");
                        if requests.send(request).is_err() {
                            tracing::debug!("stage is gone; dropping request");
                        }
                    }
                    Err(err) => {
                        tracing::warn!(%utterance, error = %err, "classification failed");
                    }
                }
            });
        }
        tracing::debug!("classification task finished");
    })
}

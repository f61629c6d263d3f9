//! Capture and classification: utterances in, shape requests out.
//!
//! # Invariants
//! - Capture state changes only on explicit toggles and session events.
//! - A session that ends while listening is restarted; while idle it is not.
//! - Classification failures never reach the simulation; they are logged.
//! - Everything here runs on one thread; the only blocking work (HTTP) is
//!   pushed to tokio's blocking pool.

pub mod classify;
pub mod controller;
pub mod http;
pub mod keyword;
pub mod scripted;
mod task;

pub use classify::{ClassificationFailure, Classifier, parse_classification};
pub use controller::{CaptureController, CaptureError, CaptureEvent, CaptureSource, CaptureState};
pub use http::{ClassifierConfig, HttpClassifier};
pub use keyword::KeywordClassifier;
pub use scripted::ScriptedCapture;
pub use task::spawn_classification;

pub fn crate_info() -> &'static str {
    "voxshape-capture v0.1.0"
}

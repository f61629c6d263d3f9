//! Offline classifier that spots shape, color and size words.

use crate::classify::{ClassificationFailure, Classifier};
use std::collections::BTreeSet;
use std::future::{Future, ready};
use voxshape_spawn::{COLOR_TOKENS, SIZE_TOKENS, ShapeRequest};

const SHAPE_ALIASES: &[(&str, &str)] = &[
    ("circles", "circle"),
    ("ball", "circle"),
    ("squares", "square"),
    ("box", "square"),
    ("triangles", "triangle"),
    ("dino", "dinosaur"),
    ("t-rex", "dinosaur"),
    ("dinosaurs", "dinosaur"),
];

const SIZE_ALIASES: &[(&str, &str)] = &[
    ("big", "large"),
    ("huge", "large"),
    ("tiny", "small"),
    ("little", "small"),
];

/// Picks the first known shape, color and size word out of an utterance.
///
/// Only shapes in the configured set are recognized. A missing color or
/// size word yields an empty token, which the spawn pipeline maps to its
/// defaults.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    shapes: BTreeSet<String>,
}

impl KeywordClassifier {
    pub fn new(shapes: BTreeSet<String>) -> Self {
        Self { shapes }
    }

    /// Classify without going through a future.
    pub fn classify_now(&self, utterance: &str) -> Result<ShapeRequest, ClassificationFailure> {
        let lowered = utterance.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '-'))
            .filter(|w| !w.is_empty())
            .collect();

        let shape = words
            .iter()
            .map(|w| alias(SHAPE_ALIASES, w))
            .find(|w| self.shapes.contains(*w))
            .ok_or_else(|| ClassificationFailure::NoMatch(utterance.to_string()))?;
        let color = words
            .iter()
            .find(|w| COLOR_TOKENS.contains(*w))
            .copied()
            .unwrap_or_default();
        let size = words
            .iter()
            .map(|w| alias(SIZE_ALIASES, w))
            .find(|w| SIZE_TOKENS.contains(w))
            .unwrap_or_default();

        Ok(ShapeRequest::new(shape, color, size))
    }
}

impl Classifier for KeywordClassifier {
    fn name(&self) -> &str {
        "keyword"
    }

    fn classify(
        &self,
        utterance: &str,
    ) -> impl Future<Output = Result<ShapeRequest, ClassificationFailure>> {
        ready(self.classify_now(utterance))
    }
}

fn alias<'a>(table: &[(&str, &'a str)], word: &'a str) -> &'a str {
    table
        .iter()
        .find(|(from, _)| *from == word)
        .map_or(word, |(_, to)| *to)
}

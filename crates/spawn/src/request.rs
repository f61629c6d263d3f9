use serde::{Deserialize, Serialize};

/// A classified utterance: which shape, in what color, at what size.
///
/// All three fields are tokens. Unknown color and size tokens fall back to
/// defaults at spawn time; an unknown shape aborts the spawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShapeRequest {
    pub shape: String,
    pub color: String,
    pub size: String,
}

impl ShapeRequest {
    pub fn new(shape: impl Into<String>, color: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            shape: shape.into(),
            color: color.into(),
            size: size.into(),
        }
    }
}

impl std::fmt::Display for ShapeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.size, self.color, self.shape)
    }
}

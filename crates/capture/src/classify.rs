use std::future::Future;
use voxshape_spawn::ShapeRequest;

/// Why an utterance produced no shape request.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationFailure {
    #[error("classifier transport error: {0}")]
    Transport(String),
    #[error("classifier returned no content")]
    EmptyResponse,
    #[error("classifier payload is not a shape description: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    #[error("classifier payload is not a JSON object")]
    NotAnObject,
    #[error("no shape mentioned in {0:?}")]
    NoMatch(String),
}

/// Turns an utterance into a shape request.
///
/// Calls may be slow; the classification task runs each one as its own
/// local future so they never hold up the frame loop.
pub trait Classifier {
    fn name(&self) -> &str;

    fn classify(
        &self,
        utterance: &str,
    ) -> impl Future<Output = Result<ShapeRequest, ClassificationFailure>>;
}

/// Parse a classifier reply. It must be a JSON object with exactly the
/// string fields `shape`, `color` and `size`.
pub fn parse_classification(content: &str) -> Result<ShapeRequest, ClassificationFailure> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ClassificationFailure::EmptyResponse);
    }
    let value: serde_json::Value = serde_json::from_str(content)?;
    if !value.is_object() {
        return Err(ClassificationFailure::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_payload() {
        let req = parse_classification(r#" {"shape":"dinosaur","color":"blue","size":"medium"} "#)
            .unwrap();
        assert_eq!(req, ShapeRequest::new("dinosaur", "blue", "medium"));
    }

    #[test]
    fn empty_reply_is_failure() {
        assert!(matches!(
            parse_classification("  "),
            Err(ClassificationFailure::EmptyResponse)
        ));
    }

    #[test]
    fn non_json_is_failure() {
        assert!(matches!(
            parse_classification("a red circle"),
            Err(ClassificationFailure::InvalidPayload(_))
        ));
    }

    #[test]
    fn missing_field_is_failure() {
        assert!(matches!(
            parse_classification(r#"{"shape":"circle","size":"large"}"#),
            Err(ClassificationFailure::InvalidPayload(_))
        ));
    }

    #[test]
    fn json_array_is_failure() {
        assert!(matches!(
            parse_classification(r#"["circle","red","large"]"#),
            Err(ClassificationFailure::NotAnObject)
        ));
    }
}

//! Failure kinds of a single facade request.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FacadeError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Upstream request failed: {0}")]
    UpstreamTransport(#[from] reqwest::Error),

    #[error("Upstream responded with status {0}")]
    UpstreamStatus(StatusCode),

    #[error("Upstream did not report success (cod = {0})")]
    UpstreamMarker(String),

    #[error("Upstream body is not valid JSON: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Upstream document is missing {0}")]
    ShapingMiss(&'static str),
}

impl FacadeError {
    /// Short stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::UpstreamTransport(e) if e.is_timeout() => "upstream_timeout",
            Self::UpstreamTransport(_) => "upstream_transport",
            Self::UpstreamStatus(_) => "upstream_status",
            Self::UpstreamMarker(_) => "upstream_marker",
            Self::MalformedBody(_) => "malformed_body",
            Self::ShapingMiss(_) => "shaping_miss",
        }
    }

    /// Everything except bad caller input is reported to clients as "not found".
    pub fn is_not_found(&self) -> bool {
        !matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_validation_is_not_a_not_found() {
        assert!(!FacadeError::Validation("lat".into()).is_not_found());
        assert!(FacadeError::UpstreamStatus(StatusCode::UNAUTHORIZED).is_not_found());
        assert!(FacadeError::UpstreamMarker("404".into()).is_not_found());
        assert!(FacadeError::ShapingMiss("coord").is_not_found());
    }

    #[test]
    fn kinds_are_distinct() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

        let kinds = [
            FacadeError::Validation(String::new()).kind(),
            FacadeError::UpstreamStatus(StatusCode::BAD_GATEWAY).kind(),
            FacadeError::UpstreamMarker(String::new()).kind(),
            FacadeError::MalformedBody(parse_err).kind(),
            FacadeError::ShapingMiss("wind").kind(),
        ];

        let mut unique = kinds.to_vec();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), kinds.len());
    }

    #[test]
    fn shaping_miss_names_the_field() {
        let err = FacadeError::ShapingMiss("sys.sunrise");
        assert_eq!(err.to_string(), "Upstream document is missing sys.sunrise");
    }
}

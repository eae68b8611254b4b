//! Failure surface exposed to the dispatch host.

use serde::Serialize;
use thiserror::Error;

use crate::color::ColorError;
use crate::names::NameServiceError;
use crate::resolve::{suggestions, ResolveError, SUGGESTION_LIMIT};
use crate::tag::{SyncError, TagStoreError};

/// Structured failures returned by the request handlers.
///
/// The first four variants are user-facing outcomes the host phrases
/// itself; the last two are infrastructure failures propagated opaquely.
/// No handler commits partial state before returning one of these.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("malformed color code: {0:?}")]
    Malformed(String),

    #[error("unrecognized color: {0:?}")]
    Unknown(String),

    #[error("ambiguous color {input:?}: {} candidates", .candidates.len())]
    Ambiguous {
        input: String,
        candidates: Vec<String>,
    },

    #[error("administrator permission required")]
    PermissionDenied,

    #[error(transparent)]
    Names(#[from] NameServiceError),

    #[error(transparent)]
    Store(#[from] TagStoreError),
}

impl From<SyncError> for ServiceError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::Store(e) => Self::Store(e),
        }
    }
}

impl From<ResolveError> for ServiceError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Color(ColorError::Malformed(input)) => Self::Malformed(input),
            ResolveError::Names(e) => Self::Names(e),
        }
    }
}

impl ServiceError {
    /// Machine-usable error code plus an optional human tip.
    pub fn error_code_and_tip(&self) -> (&'static str, Option<&'static str>) {
        match self {
            Self::Malformed(_) => (
                "MALFORMED_COLOR",
                Some("Use a hex code like #f0000d or #413"),
            ),
            Self::Unknown(_) => ("UNKNOWN_COLOR", None),
            Self::Ambiguous { .. } => (
                "AMBIGUOUS_COLOR",
                Some("Pick one of the suggested names"),
            ),
            Self::PermissionDenied => ("PERMISSION_DENIED", None),
            Self::Names(_) => ("NAME_SERVICE_ERROR", None),
            Self::Store(_) => ("STORE_ERROR", None),
        }
    }

    /// For ambiguous failures: the sorted suggestion shortlist and the
    /// count of candidates beyond it.
    pub fn ambiguity_suggestions(&self) -> Option<(Vec<String>, usize)> {
        match self {
            Self::Ambiguous { candidates, .. } => Some(suggestions(candidates, SUGGESTION_LIMIT)),
            _ => None,
        }
    }

    /// Wire-ready form for hosts that carry failures across a process
    /// boundary.
    pub fn to_structured(&self) -> StructuredFailure {
        let (code, tip) = self.error_code_and_tip();
        let (suggestions, remaining_candidates) =
            self.ambiguity_suggestions().unwrap_or((Vec::new(), 0));
        StructuredFailure {
            code: code.to_string(),
            message: self.to_string(),
            tip: tip.map(str::to_string),
            suggestions,
            remaining_candidates,
        }
    }
}

/// Serializable failure payload.
#[derive(Debug, Clone, Serialize)]
pub struct StructuredFailure {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "usize_is_zero")]
    pub remaining_candidates: usize,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's skip predicate takes a reference
fn usize_is_zero(n: &usize) -> bool {
    *n == 0
}

impl StructuredFailure {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            // Fallback: produce a minimal valid JSON manually
            r#"{"code":"INTERNAL_ERROR","message":"serialization error"}"#.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let cases: Vec<(ServiceError, &str)> = vec![
            (ServiceError::Malformed("#xyz".into()), "MALFORMED_COLOR"),
            (ServiceError::Unknown("blurple".into()), "UNKNOWN_COLOR"),
            (
                ServiceError::Ambiguous {
                    input: "vi".into(),
                    candidates: vec!["violet".into(), "vivid red".into()],
                },
                "AMBIGUOUS_COLOR",
            ),
            (ServiceError::PermissionDenied, "PERMISSION_DENIED"),
        ];
        for (err, code) in cases {
            assert_eq!(err.error_code_and_tip().0, code);
        }
    }

    #[test]
    fn test_ambiguity_suggestions_sorted_and_counted() {
        let candidates: Vec<String> = (0..12).map(|i| format!("color {i:02}")).collect();
        let err = ServiceError::Ambiguous {
            input: "color".into(),
            candidates,
        };
        let (best, remaining) = err.ambiguity_suggestions().unwrap();
        assert_eq!(best.len(), 10);
        assert_eq!(remaining, 2);
        assert_eq!(best[0], "color 00");
    }

    #[test]
    fn test_non_ambiguous_has_no_suggestions() {
        assert!(ServiceError::PermissionDenied
            .ambiguity_suggestions()
            .is_none());
    }

    #[test]
    fn test_structured_failure_json_shape() {
        let err = ServiceError::Malformed("#xyz".into());
        let json = err.to_structured().to_json();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["code"], "MALFORMED_COLOR");
        assert!(parsed.get("suggestions").is_none());
        assert!(parsed.get("remaining_candidates").is_none());
        assert!(parsed["tip"].as_str().unwrap().contains("hex"));
    }

    #[test]
    fn test_structured_failure_carries_suggestions() {
        let err = ServiceError::Ambiguous {
            input: "vi".into(),
            candidates: (0..12).map(|i| format!("shade {i:02}")).collect(),
        };
        let json = err.to_structured().to_json();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["suggestions"].as_array().unwrap().len(), 10);
        assert_eq!(parsed["remaining_candidates"], 2);
    }
}

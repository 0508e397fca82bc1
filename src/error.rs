use std::fmt;
use thiserror::Error;

/// Which upstream lookup a request was made against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// Prefix completion (`/sug?s=`)
    Completion,
    /// Phonetic match (`/words?sl=`)
    SoundsLike,
}

impl LookupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupKind::Completion => "completion",
            LookupKind::SoundsLike => "sounds-like",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream failure while resolving suggestions.
///
/// These never reach the HTTP caller; the service logs them and answers
/// with an empty list.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{kind} lookup timed out")]
    Timeout { kind: LookupKind },

    #[error("{kind} lookup failed: {source}")]
    Transport {
        kind: LookupKind,
        #[source]
        source: reqwest::Error,
    },

    #[error("{kind} lookup returned HTTP {status}")]
    Status { kind: LookupKind, status: u16 },

    #[error("{kind} lookup returned malformed JSON: {source}")]
    Decode {
        kind: LookupKind,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Classify a reqwest error, separating timeouts from other transport failures
    pub fn from_reqwest(kind: LookupKind, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            FetchError::Timeout { kind }
        } else {
            FetchError::Transport { kind, source }
        }
    }

    pub fn kind(&self) -> LookupKind {
        match self {
            FetchError::Timeout { kind }
            | FetchError::Transport { kind, .. }
            | FetchError::Status { kind, .. }
            | FetchError::Decode { kind, .. } => *kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status {
            kind: LookupKind::SoundsLike,
            status: 503,
        };
        assert_eq!(err.to_string(), "sounds-like lookup returned HTTP 503");
        assert_eq!(err.kind(), LookupKind::SoundsLike);
    }

    #[test]
    fn test_decode_error_keeps_kind() {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = FetchError::Decode {
            kind: LookupKind::Completion,
            source,
        };
        assert_eq!(err.kind(), LookupKind::Completion);
        assert!(err.to_string().starts_with("completion lookup returned malformed JSON"));
    }
}

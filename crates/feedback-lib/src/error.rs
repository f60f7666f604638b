use thiserror::Error;

/// Failure reported by a collaborator (item source, profiles, groups).
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("'{0}' is not available")]
    Unavailable(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the feedback helper once every fallback is exhausted.
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("failed to load items of feedback {form_id}: {source}")]
    Items {
        form_id: u64,
        #[source]
        source: SourceError,
    },
    #[error("failed to load responses analysis of feedback {form_id}: {source}")]
    Analysis {
        form_id: u64,
        #[source]
        source: SourceError,
    },
    #[error("failed to load non respondents of feedback {form_id}: {source}")]
    NonRespondents {
        form_id: u64,
        #[source]
        source: SourceError,
    },
    #[error("failed to load groups of module {cm_id}: {source}")]
    Groups {
        cm_id: u64,
        #[source]
        source: SourceError,
    },
}

pub mod error;
pub mod helper;
pub mod source;

pub use error::{FeedbackError, SourceError};
pub use helper::{FeedbackHelper, GroupInfo, attach_values};
pub use source::{
    Attempt, FeedbackSource, Group, GroupMode, GroupSource, NonRespondent, NonRespondents,
    PageItemsResponse, ProfileSource, ProfileTarget, ResponsesAnalysis, StoredValue, UserProfile,
    ValueFetch,
};

pub use feedback_spec::{Page, ResolvedI18nMap};

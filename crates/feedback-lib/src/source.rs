use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use feedback_spec::ItemDescriptor;

use crate::error::SourceError;

/// Items of a single page as returned by direct page retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageItemsResponse {
    pub items: Vec<ItemDescriptor>,
    #[serde(rename = "hasprevpage", default)]
    pub has_prev_page: bool,
    #[serde(rename = "hasnextpage", default)]
    pub has_next_page: bool,
}

/// Answer previously recorded for an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredValue {
    pub item: u64,
    pub value: String,
}

/// Cache policy for stored value retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValueFetch {
    /// Only use cached data. Takes priority over `ignore_cache`.
    pub offline: bool,
    pub ignore_cache: bool,
}

/// Records that can carry a user's profile picture.
pub trait ProfileTarget {
    fn user_id(&self) -> u64;
    fn course_id(&self) -> u64;
    fn set_profile_image_url(&mut self, url: Option<String>);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub id: u64,
    #[serde(rename = "userid")]
    pub user_id: u64,
    #[serde(rename = "courseid", default)]
    pub course_id: u64,
    #[serde(rename = "fullname", default)]
    pub full_name: String,
    #[serde(
        rename = "profileimageurl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_image_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProfileTarget for Attempt {
    fn user_id(&self) -> u64 {
        self.user_id
    }

    fn course_id(&self) -> u64 {
        self.course_id
    }

    fn set_profile_image_url(&mut self, url: Option<String>) {
        self.profile_image_url = url;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsesAnalysis {
    #[serde(default)]
    pub attempts: Vec<Attempt>,
    #[serde(rename = "totalattempts", default)]
    pub total_attempts: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonRespondent {
    #[serde(rename = "userid")]
    pub user_id: u64,
    #[serde(rename = "courseid", default)]
    pub course_id: u64,
    #[serde(rename = "fullname", default)]
    pub full_name: String,
    #[serde(default)]
    pub started: bool,
    #[serde(
        rename = "profileimageurl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_image_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProfileTarget for NonRespondent {
    fn user_id(&self) -> u64 {
        self.user_id
    }

    fn course_id(&self) -> u64 {
        self.course_id
    }

    fn set_profile_image_url(&mut self, url: Option<String>) {
        self.profile_image_url = url;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonRespondents {
    #[serde(default)]
    pub users: Vec<NonRespondent>,
    #[serde(default)]
    pub total: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    #[serde(rename = "fullname", default)]
    pub full_name: String,
    #[serde(
        rename = "profileimageurl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupMode {
    NoGroups,
    SeparateGroups,
    VisibleGroups,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
}

/// Retrieval of feedback items, answers and reports.
#[async_trait]
pub trait FeedbackSource: Send + Sync {
    async fn page_items(&self, form_id: u64, page: usize) -> Result<PageItemsResponse, SourceError>;

    /// Every item of the feedback in order, page breaks included.
    async fn all_items(&self, form_id: u64) -> Result<Vec<ItemDescriptor>, SourceError>;

    async fn stored_values(
        &self,
        form_id: u64,
        fetch: ValueFetch,
    ) -> Result<Vec<StoredValue>, SourceError>;

    async fn responses_analysis(
        &self,
        form_id: u64,
        group_id: u64,
        page: usize,
    ) -> Result<ResponsesAnalysis, SourceError>;

    async fn non_respondents(
        &self,
        form_id: u64,
        group_id: u64,
        page: usize,
    ) -> Result<NonRespondents, SourceError>;
}

#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn profile(&self, user_id: u64, course_id: u64) -> Result<UserProfile, SourceError>;
}

#[async_trait]
pub trait GroupSource: Send + Sync {
    async fn group_mode(&self, cm_id: u64) -> Result<GroupMode, SourceError>;
    async fn allowed_groups(&self, cm_id: u64) -> Result<Vec<Group>, SourceError>;
}

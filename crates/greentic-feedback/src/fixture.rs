use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::trace;

use feedback_spec::ItemDescriptor;
use greentic_feedback_lib::{
    FeedbackSource, Group, GroupMode, GroupSource, NonRespondents, PageItemsResponse,
    ProfileSource, ResponsesAnalysis, SourceError, StoredValue, UserProfile, ValueFetch,
};

/// Feedback data exported to a directory of JSON files.
///
/// ```text
/// items.json            every item of the feedback, page breaks included
/// pages/<n>.json        direct retrieval of page n (zero-based)
/// values.json           stored answers
/// analysis.json         responses analysis
/// nonrespondents.json   users without a submission
/// profiles.json         user profiles
/// groups.json           {"mode": "separate_groups", "groups": [...]}
/// ```
#[derive(Debug, Clone)]
pub struct FixtureSource {
    root: PathBuf,
}

#[derive(Debug, Deserialize)]
struct GroupsFile {
    mode: GroupMode,
    #[serde(default)]
    groups: Vec<Group>,
}

impl FixtureSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn read_json<T: DeserializeOwned>(&self, relative: &str) -> Result<T, SourceError> {
        let path = self.root.join(relative);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(SourceError::Unavailable(path.display().to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        trace!(path = %path.display(), "loaded fixture");
        Ok(serde_json::from_str(&raw)?)
    }

    async fn groups_file(&self) -> Result<Option<GroupsFile>, SourceError> {
        match self.read_json("groups.json").await {
            Ok(file) => Ok(Some(file)),
            Err(SourceError::Unavailable(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl FeedbackSource for FixtureSource {
    async fn page_items(&self, _form_id: u64, page: usize) -> Result<PageItemsResponse, SourceError> {
        self.read_json(&format!("pages/{page}.json")).await
    }

    async fn all_items(&self, _form_id: u64) -> Result<Vec<ItemDescriptor>, SourceError> {
        self.read_json("items.json").await
    }

    async fn stored_values(
        &self,
        _form_id: u64,
        fetch: ValueFetch,
    ) -> Result<Vec<StoredValue>, SourceError> {
        trace!(offline = fetch.offline, ignore_cache = fetch.ignore_cache, "reading stored values");
        self.read_json("values.json").await
    }

    async fn responses_analysis(
        &self,
        _form_id: u64,
        _group_id: u64,
        _page: usize,
    ) -> Result<ResponsesAnalysis, SourceError> {
        self.read_json("analysis.json").await
    }

    async fn non_respondents(
        &self,
        _form_id: u64,
        _group_id: u64,
        _page: usize,
    ) -> Result<NonRespondents, SourceError> {
        self.read_json("nonrespondents.json").await
    }
}

#[async_trait]
impl ProfileSource for FixtureSource {
    async fn profile(&self, user_id: u64, _course_id: u64) -> Result<UserProfile, SourceError> {
        let profiles: Vec<UserProfile> = self.read_json("profiles.json").await?;
        profiles
            .into_iter()
            .find(|profile| profile.id == user_id)
            .ok_or_else(|| SourceError::Unavailable(format!("profile of user {user_id}")))
    }
}

#[async_trait]
impl GroupSource for FixtureSource {
    async fn group_mode(&self, _cm_id: u64) -> Result<GroupMode, SourceError> {
        Ok(self
            .groups_file()
            .await?
            .map_or(GroupMode::NoGroups, |file| file.mode))
    }

    async fn allowed_groups(&self, _cm_id: u64) -> Result<Vec<Group>, SourceError> {
        Ok(self
            .groups_file()
            .await?
            .map(|file| file.groups)
            .unwrap_or_default())
    }
}

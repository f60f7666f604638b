use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::debug;

use feedback_spec::i18n::ALL_PARTICIPANTS_KEY;
use feedback_spec::{
    DefaultLocalizer, FilledItem, ItemDescriptor, Localizer, Page, ParseContext, assemble_page,
    localized, materialize_all,
};

use crate::error::FeedbackError;
use crate::source::{
    FeedbackSource, Group, GroupMode, GroupSource, NonRespondents, ProfileSource, ProfileTarget,
    ResponsesAnalysis, StoredValue, ValueFetch,
};

/// Group selector data for a feedback activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    #[serde(rename = "separateGroups")]
    pub separate_groups: bool,
    #[serde(rename = "visibleGroups")]
    pub visible_groups: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
}

/// Combines the collaborators into page, report and group lookups.
pub struct FeedbackHelper {
    source: Arc<dyn FeedbackSource>,
    profiles: Arc<dyn ProfileSource>,
    groups: Arc<dyn GroupSource>,
    localizer: Arc<dyn Localizer>,
    preview: bool,
}

impl FeedbackHelper {
    pub fn new(
        source: Arc<dyn FeedbackSource>,
        profiles: Arc<dyn ProfileSource>,
        groups: Arc<dyn GroupSource>,
    ) -> Self {
        Self {
            source,
            profiles,
            groups,
            localizer: Arc::new(DefaultLocalizer),
            preview: false,
        }
    }

    pub fn with_localizer(mut self, localizer: Arc<dyn Localizer>) -> Self {
        self.localizer = localizer;
        self
    }

    /// Preview mode keeps page breaks as renderable items.
    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    fn parse_context(&self) -> ParseContext<'_> {
        ParseContext::new(self.localizer.as_ref()).with_preview(self.preview)
    }

    /// Loads one page of items with their stored values.
    ///
    /// When direct page retrieval fails the page is rebuilt from the full item list, with
    /// dependencies on earlier pages evaluated locally.
    pub async fn page_items(
        &self,
        form_id: u64,
        page: usize,
        fetch: ValueFetch,
    ) -> Result<Page, FeedbackError> {
        match self.source.page_items(form_id, page).await {
            Ok(response) => {
                let items = self.fill_values(form_id, response.items, fetch).await;
                Ok(Page {
                    items: materialize_all(items, &self.parse_context()),
                    has_prev_page: response.has_prev_page,
                    has_next_page: response.has_next_page,
                })
            }
            Err(err) => {
                debug!(
                    form_id,
                    page,
                    error = %err,
                    "page retrieval failed, assembling page from the full item list"
                );
                let items = self
                    .source
                    .all_items(form_id)
                    .await
                    .map_err(|source| FeedbackError::Items { form_id, source })?;
                let items = self.fill_values(form_id, items, fetch).await;
                Ok(assemble_page(&items, page, &self.parse_context()))
            }
        }
    }

    /// Attaches stored answers to the items that take a value.
    ///
    /// Items are returned unfilled when the stored values cannot be retrieved.
    pub async fn fill_values(
        &self,
        form_id: u64,
        items: Vec<ItemDescriptor>,
        fetch: ValueFetch,
    ) -> Vec<FilledItem> {
        let values = match self.source.stored_values(form_id, fetch).await {
            Ok(values) => values,
            Err(err) => {
                debug!(form_id, error = %err, "stored values unavailable, continuing without them");
                Vec::new()
            }
        };
        attach_values(items, &values)
    }

    /// Responses analysis with each attempt's profile picture filled in where available.
    pub async fn responses_analysis(
        &self,
        form_id: u64,
        group_id: u64,
        page: usize,
    ) -> Result<ResponsesAnalysis, FeedbackError> {
        let mut analysis = self
            .source
            .responses_analysis(form_id, group_id, page)
            .await
            .map_err(|source| FeedbackError::Analysis { form_id, source })?;
        self.enrich_profiles(&mut analysis.attempts).await;
        Ok(analysis)
    }

    /// Users who did not submit, with profile pictures filled in where available.
    pub async fn non_respondents(
        &self,
        form_id: u64,
        group_id: u64,
        page: usize,
    ) -> Result<NonRespondents, FeedbackError> {
        let mut report = self
            .source
            .non_respondents(form_id, group_id, page)
            .await
            .map_err(|source| FeedbackError::NonRespondents { form_id, source })?;
        self.enrich_profiles(&mut report.users).await;
        Ok(report)
    }

    /// Looks up every target's profile concurrently; failed lookups leave the target untouched.
    pub async fn enrich_profiles<T: ProfileTarget + Send>(&self, targets: &mut [T]) {
        let lookups = targets.iter_mut().map(|target| async move {
            let (user_id, course_id) = (target.user_id(), target.course_id());
            match self.profiles.profile(user_id, course_id).await {
                Ok(profile) => target.set_profile_image_url(profile.profile_image_url),
                Err(err) => {
                    debug!(user_id, course_id, error = %err, "profile lookup failed, leaving record unenriched");
                }
            }
        });
        join_all(lookups).await;
    }

    /// Group selector for a feedback activity, led by an "all participants" entry.
    pub async fn group_info(&self, cm_id: u64) -> Result<GroupInfo, FeedbackError> {
        let mode = self
            .groups
            .group_mode(cm_id)
            .await
            .map_err(|source| FeedbackError::Groups { cm_id, source })?;

        let mut info = GroupInfo::default();
        let groups = match mode {
            GroupMode::SeparateGroups | GroupMode::VisibleGroups => {
                info.separate_groups = mode == GroupMode::SeparateGroups;
                info.visible_groups = mode == GroupMode::VisibleGroups;
                self.groups
                    .allowed_groups(cm_id)
                    .await
                    .map_err(|source| FeedbackError::Groups { cm_id, source })?
            }
            GroupMode::NoGroups => Vec::new(),
        };

        if groups.is_empty() {
            info.separate_groups = false;
            info.visible_groups = false;
        } else {
            info.groups = std::iter::once(Group {
                id: 0,
                name: localized(self.localizer.as_ref(), ALL_PARTICIPANTS_KEY),
            })
            .chain(groups)
            .collect();
        }
        Ok(info)
    }
}

/// Pairs each item that takes a value with the first stored answer recorded for it.
pub fn attach_values(items: Vec<ItemDescriptor>, values: &[StoredValue]) -> Vec<FilledItem> {
    items
        .into_iter()
        .map(|item| {
            let raw_value = if item.has_value {
                values
                    .iter()
                    .find(|value| value.item == item.id)
                    .map(|value| value.value.clone())
            } else {
                None
            };
            FilledItem::new(item, raw_value)
        })
        .collect()
}

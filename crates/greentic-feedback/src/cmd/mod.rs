pub mod analysis;
pub mod encode;
pub mod groups;
pub mod i18n;
pub mod page;

use std::sync::Arc;

use anyhow::Result;
use feedback_spec::Localizer;
use greentic_feedback_lib::FeedbackHelper;
use serde::Serialize;

use crate::fixture::FixtureSource;

/// Settings shared by every command.
pub struct CliContext {
    pub preview: bool,
    pub localizer: Arc<dyn Localizer>,
}

impl CliContext {
    pub fn helper(&self, source: FixtureSource) -> FeedbackHelper {
        let source = Arc::new(source);
        FeedbackHelper::new(source.clone(), source.clone(), source)
            .with_localizer(self.localizer.clone())
            .with_preview(self.preview)
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

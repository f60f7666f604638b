use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::dependency::is_visible;
use crate::item::{FilledItem, ItemKind, MaterializedItem};
use crate::materialize::materialize_all;
use crate::presentation::ParseContext;

/// Items of one page together with navigation availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<MaterializedItem>,
    #[serde(rename = "hasprevpage")]
    pub has_prev_page: bool,
    #[serde(rename = "hasnextpage")]
    pub has_next_page: bool,
}

/// Builds page `target_page` (zero-based) out of the complete, ordered item list.
///
/// Page breaks split the list and never appear in the result. Items on earlier pages only
/// feed dependency checks; scanning stops at the first break after the target page.
pub fn assemble_page(items: &[FilledItem], target_page: usize, ctx: &ParseContext<'_>) -> Page {
    let mut current_page = 0usize;
    let mut preceding: Vec<&FilledItem> = Vec::new();
    let mut page_items = Vec::new();

    for filled in items {
        if current_page > target_page {
            break;
        }
        if filled.item.kind == ItemKind::PageBreak {
            current_page += 1;
            continue;
        }
        if current_page < target_page {
            preceding.push(filled);
            continue;
        }
        if is_visible(&filled.item, &preceding) {
            page_items.push(filled.clone());
        } else {
            trace!(
                item_id = filled.item.id,
                depend_item = ?filled.item.depend_item,
                "dependency not satisfied, hiding item"
            );
        }
    }

    Page {
        items: materialize_all(page_items, ctx),
        has_prev_page: target_page > 0,
        has_next_page: current_page > target_page,
    }
}

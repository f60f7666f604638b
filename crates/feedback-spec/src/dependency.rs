use crate::item::{FilledItem, ItemDescriptor, ItemKind, Subtype};
use crate::presentation::{
    LINE_SEP, MULTICHOICE_ADJUST_SEP, MultichoicePresentation, rated_label,
};

/// Decides whether `item` is shown given the items answered on earlier pages.
///
/// Dependencies on items absent from `preceding` (deleted, or on the same or a later page)
/// are treated as satisfied.
pub fn is_visible<T: AsRef<FilledItem>>(item: &ItemDescriptor, preceding: &[T]) -> bool {
    let Some(target) = item.depend_item else {
        return true;
    };
    let Some(depend) = preceding
        .iter()
        .map(AsRef::as_ref)
        .find(|candidate| candidate.item.id == target)
    else {
        return true;
    };

    match depend.item.kind {
        ItemKind::Label => false,
        ItemKind::Multichoice | ItemKind::MultichoiceRated => {
            selected_choice_matches(depend, &item.depend_value)
        }
        _ => depend.raw_value.as_deref() == Some(item.depend_value.as_str()),
    }
}

fn selected_choice_matches(depend: &FilledItem, expected: &str) -> bool {
    let presentation = MultichoicePresentation::parse(&depend.item.presentation);
    let block = presentation
        .block
        .split(MULTICHOICE_ADJUST_SEP)
        .next()
        .unwrap_or_default();

    let selected: Vec<Option<usize>> = match (presentation.subtype, depend.raw_value.as_deref()) {
        (Subtype::Checkbox, Some(raw)) => raw.split(LINE_SEP).map(position).collect(),
        (_, Some(raw)) => vec![position(raw)],
        (_, None) => vec![None],
    };

    for (index, cell) in block.split(LINE_SEP).enumerate() {
        let choice = index + 1;
        if !selected.contains(&Some(choice)) {
            continue;
        }
        let label = if depend.item.kind == ItemKind::MultichoiceRated {
            rated_label(cell)
        } else {
            cell
        };
        if label.trim() == expected {
            return true;
        }
        if selected.len() == 1 {
            return false;
        }
    }
    false
}

fn position(raw: &str) -> Option<usize> {
    raw.trim().parse().ok()
}

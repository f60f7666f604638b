//! Decoding of raw presentation strings into typed item forms.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::i18n::{FULL_DATE_KEY, Localizer, NOT_SELECTED_KEY, localized};
use crate::item::{
    Choice, ChoiceForm, InfoMode, ItemDescriptor, ItemForm, ItemKind, ItemValue, Subtype,
};
use crate::text::{parse_int_prefix, replace_pluginfile_urls};

pub const LINE_SEP: &str = "|";
pub const MULTICHOICE_TYPE_SEP: &str = ">>>>>";
pub const MULTICHOICE_ADJUST_SEP: &str = "<<<<<";
pub const MULTICHOICE_HIDE_NO_SELECT: char = 'h';
pub const MULTICHOICERATED_VALUE_SEP: &str = "####";
pub const DEFAULT_TEXTFIELD_LENGTH: usize = 255;
/// Value submitted for response-time info items; the server substitutes its own clock.
pub const CURRENT_TIMESTAMP: &str = "__CURRENT__TIMESTAMP__";

/// Inputs shared by every parse: preview mode, translations and the clock.
#[derive(Clone, Copy)]
pub struct ParseContext<'a> {
    pub preview: bool,
    pub localizer: &'a dyn Localizer,
    pub now: OffsetDateTime,
}

impl<'a> ParseContext<'a> {
    pub fn new(localizer: &'a dyn Localizer) -> Self {
        Self {
            preview: false,
            localizer,
            now: OffsetDateTime::now_utc(),
        }
    }

    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    pub fn with_now(mut self, now: OffsetDateTime) -> Self {
        self.now = now;
        self
    }

    /// Formats `at` with the localized full-date description, falling back to RFC 3339.
    pub fn format_timestamp(&self, at: OffsetDateTime) -> String {
        let pattern = localized(self.localizer, FULL_DATE_KEY);
        time::format_description::parse(&pattern)
            .ok()
            .and_then(|description| at.format(&description).ok())
            .or_else(|| at.format(&Rfc3339).ok())
            .unwrap_or_default()
    }
}

/// Parses an item into its renderable form with default values.
///
/// Returns `None` for items that cannot be rendered: unknown kinds, info items with an
/// unknown mode and page breaks outside preview.
pub fn parse_item(item: &ItemDescriptor, ctx: &ParseContext<'_>) -> Option<ItemForm> {
    match item.kind {
        ItemKind::Label => Some(ItemForm::Label {
            text: replace_pluginfile_urls(&item.presentation, &item.item_files),
        }),
        ItemKind::Info => parse_info(item, ctx),
        ItemKind::Numeric => Some(parse_numeric(&item.presentation)),
        ItemKind::TextField => Some(parse_textfield(&item.presentation)),
        ItemKind::TextArea => Some(ItemForm::TextArea {
            value: ItemValue::Empty,
        }),
        ItemKind::Multichoice | ItemKind::MultichoiceRated => Some(ItemForm::Multichoice(
            parse_multichoice(&item.presentation, &item.options, ctx),
        )),
        ItemKind::PageBreak => ctx.preview.then_some(ItemForm::PageBreak),
        ItemKind::Captcha => Some(ItemForm::Captcha {
            value: ItemValue::Empty,
        }),
        ItemKind::Other => None,
    }
}

fn parse_info(item: &ItemDescriptor, ctx: &ParseContext<'_>) -> Option<ItemForm> {
    let mode = parse_int_prefix(&item.presentation).and_then(InfoMode::from_code)?;
    Some(match mode {
        InfoMode::Course | InfoMode::Category => ItemForm::Info {
            mode,
            text: item.other_data.clone(),
            value: ItemValue::Text(item.other_data.clone()),
        },
        InfoMode::ResponseTime => ItemForm::Info {
            mode,
            text: ctx.format_timestamp(ctx.now),
            value: ItemValue::Text(CURRENT_TIMESTAMP.into()),
        },
    })
}

pub fn parse_numeric(presentation: &str) -> ItemForm {
    let mut range = presentation.split(LINE_SEP);
    let range_from = range.next().and_then(parse_int_prefix);
    let range_to = range.next().and_then(parse_int_prefix);
    ItemForm::Numeric {
        range_from,
        range_to,
        value: ItemValue::Empty,
    }
}

pub fn parse_textfield(presentation: &str) -> ItemForm {
    let max_length = presentation
        .split(LINE_SEP)
        .nth(1)
        .and_then(|length| length.trim().parse::<usize>().ok())
        .filter(|length| *length > 0)
        .unwrap_or(DEFAULT_TEXTFIELD_LENGTH);
    ItemForm::TextField {
        max_length,
        value: ItemValue::Empty,
    }
}

/// Structural split of a multichoice presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultichoicePresentation<'a> {
    pub subtype: Subtype,
    /// Choice cells joined by `|`.
    pub block: &'a str,
}

impl<'a> MultichoicePresentation<'a> {
    /// Dropdowns keep everything after the type separator as their block.
    pub fn parse(presentation: &'a str) -> Self {
        let mut parts = presentation.split(MULTICHOICE_TYPE_SEP);
        let subtype = Subtype::from_code(parts.next().unwrap_or_default());
        let rest = parts.next().unwrap_or_default();
        if subtype == Subtype::Dropdown {
            return Self {
                subtype,
                block: rest,
            };
        }
        Self {
            subtype,
            block: rest.split(MULTICHOICE_ADJUST_SEP).next().unwrap_or_default(),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &'a str> {
        self.block.split(LINE_SEP)
    }
}

/// Display label of a choice cell; weighted cells render as `"(<weight>) <label>"`.
pub fn choice_label(cell: &str) -> String {
    match cell.split_once(MULTICHOICERATED_VALUE_SEP) {
        None => cell.to_string(),
        Some((weight, rest)) => {
            let label = rest
                .split_once(MULTICHOICERATED_VALUE_SEP)
                .map_or(rest, |(label, _)| label);
            format!("({weight}) {label}")
        }
    }
}

/// Label text of a weighted cell with the weight removed; empty when the cell has no weight.
pub fn rated_label(cell: &str) -> &str {
    cell.split(MULTICHOICERATED_VALUE_SEP)
        .nth(1)
        .unwrap_or_default()
}

pub fn parse_multichoice(presentation: &str, options: &str, ctx: &ParseContext<'_>) -> ChoiceForm {
    let parsed = MultichoicePresentation::parse(presentation);
    let mut choices: Vec<Choice> = parsed
        .cells()
        .zip(1u32..)
        .map(|(cell, value)| Choice::new(value, choice_label(cell)))
        .collect();

    let value = match parsed.subtype {
        Subtype::Radio if !options.contains(MULTICHOICE_HIDE_NO_SELECT) => {
            choices.insert(0, Choice::new(0, localized(ctx.localizer, NOT_SELECTED_KEY)));
            ItemValue::Number(0)
        }
        Subtype::Dropdown => {
            choices.insert(0, Choice::new(0, ""));
            ItemValue::Number(0)
        }
        Subtype::Radio | Subtype::Checkbox => ItemValue::Empty,
    };

    ChoiceForm {
        subtype: parsed.subtype,
        choices,
        value,
    }
}

/// Whether a radio item carries the synthetic "not selected" choice.
pub fn has_no_select_choice(subtype: Subtype, options: &str) -> bool {
    match subtype {
        Subtype::Radio => !options.contains(MULTICHOICE_HIDE_NO_SELECT),
        Subtype::Dropdown => true,
        Subtype::Checkbox => false,
    }
}

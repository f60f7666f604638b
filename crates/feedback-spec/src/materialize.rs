use time::OffsetDateTime;

use crate::item::{FilledItem, InfoMode, ItemForm, ItemValue, MaterializedItem, Subtype};
use crate::presentation::{LINE_SEP, ParseContext, has_no_select_choice, parse_item};
use crate::text::parse_int_prefix;

/// Parses `source` and seeds its form from the recorded raw value.
///
/// A missing or malformed raw value leaves the kind's default in place. Only items that cannot
/// be rendered at all yield `None`.
pub fn materialize(source: FilledItem, ctx: &ParseContext<'_>) -> Option<MaterializedItem> {
    let mut form = parse_item(&source.item, ctx)?;
    if let Some(raw) = source.raw_value.as_deref() {
        seed_value(&mut form, raw, &source.item.options, ctx);
    }
    Some(MaterializedItem {
        source,
        form,
        is_empty: false,
    })
}

/// Materializes a sequence, silently dropping items that cannot be rendered.
pub fn materialize_all<I>(items: I, ctx: &ParseContext<'_>) -> Vec<MaterializedItem>
where
    I: IntoIterator<Item = FilledItem>,
{
    items
        .into_iter()
        .filter_map(|item| materialize(item, ctx))
        .collect()
}

fn seed_value(form: &mut ItemForm, raw: &str, options: &str, ctx: &ParseContext<'_>) {
    match form {
        ItemForm::Numeric { value, .. } => {
            *value = parse_int_prefix(raw).map_or(ItemValue::Empty, ItemValue::Number);
        }
        ItemForm::TextField { value, .. } | ItemForm::TextArea { value } => {
            *value = text_value(raw);
        }
        ItemForm::Info {
            mode: InfoMode::Course | InfoMode::Category,
            value,
            ..
        } => {
            *value = text_value(raw);
        }
        ItemForm::Info {
            mode: InfoMode::ResponseTime,
            text,
            ..
        } => {
            if let Some(at) = raw
                .trim()
                .parse::<i64>()
                .ok()
                .and_then(|seconds| OffsetDateTime::from_unix_timestamp(seconds).ok())
            {
                *text = ctx.format_timestamp(at);
            }
        }
        ItemForm::Multichoice(choice_form) => match choice_form.subtype {
            Subtype::Checkbox => {
                let selected: Vec<u32> = raw
                    .split(LINE_SEP)
                    .filter_map(|value| value.trim().parse().ok())
                    .collect();
                for choice in &mut choice_form.choices {
                    choice.checked = selected.contains(&choice.value);
                }
            }
            subtype => {
                let fallback = if has_no_select_choice(subtype, options) {
                    ItemValue::Number(0)
                } else {
                    ItemValue::Empty
                };
                choice_form.value = parse_int_prefix(raw).map_or(fallback, ItemValue::Number);
            }
        },
        ItemForm::Label { .. } | ItemForm::PageBreak | ItemForm::Captcha { .. } => {}
    }
}

fn text_value(raw: &str) -> ItemValue {
    if raw.is_empty() {
        ItemValue::Empty
    } else {
        ItemValue::Text(raw.to_string())
    }
}

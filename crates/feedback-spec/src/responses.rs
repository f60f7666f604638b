use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::item::{ItemForm, ItemKind, ItemValue, MaterializedItem, Subtype};
use crate::presentation::LINE_SEP;

/// Single submitted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Int(i64),
    Text(String),
}

impl ResponseValue {
    /// Zero and the empty string count as unanswered, matching the submission endpoint.
    pub fn is_answered(&self) -> bool {
        match self {
            ResponseValue::Int(value) => *value != 0,
            ResponseValue::Text(text) => !text.is_empty(),
        }
    }

    fn from_choice(value: &ItemValue) -> Self {
        match value {
            ItemValue::Number(number) if *number != 0 => ResponseValue::Int(*number),
            ItemValue::Text(text) if !text.is_empty() => ResponseValue::Text(text.clone()),
            _ => ResponseValue::Int(0),
        }
    }

    fn from_scalar(value: Option<&ItemValue>) -> Self {
        match value {
            Some(ItemValue::Number(number)) if *number != 0 => ResponseValue::Int(*number),
            Some(ItemValue::Text(text)) => ResponseValue::Text(text.clone()),
            _ => ResponseValue::Text(String::new()),
        }
    }
}

/// Submission payload keyed by `<kind>_<id>` and its indexed variants.
pub type ResponseMap = BTreeMap<String, ResponseValue>;

fn response_key(kind: ItemKind, id: u64) -> String {
    format!("{}_{}", kind.as_str(), id)
}

/// Encodes the answerable items of a page and refreshes every participating item's
/// `is_empty` flag.
pub fn encode_responses(items: &mut [MaterializedItem]) -> ResponseMap {
    let mut responses = ResponseMap::new();

    for item in items.iter_mut() {
        let kind = item.kind();
        if !item.source.item.has_value && kind != ItemKind::Captcha {
            continue;
        }
        let name = response_key(kind, item.id());

        let answered = match (&item.form, kind) {
            (ItemForm::Multichoice(form), ItemKind::Multichoice)
                if form.subtype == Subtype::Checkbox =>
            {
                responses.insert(format!("{name}[0]"), ResponseValue::Int(0));
                let mut answered = false;
                for (index, choice) in form.choices.iter().enumerate() {
                    let value = if choice.checked {
                        i64::from(choice.value)
                    } else {
                        0
                    };
                    answered |= value != 0;
                    responses.insert(format!("{name}[{}]", index + 1), ResponseValue::Int(value));
                }
                answered
            }
            (ItemForm::Multichoice(form), ItemKind::Multichoice) => {
                let value = ResponseValue::from_choice(&form.value);
                let answered = value.is_answered();
                responses.insert(format!("{name}[0]"), value);
                answered
            }
            (ItemForm::Multichoice(form), _) => {
                let value = ResponseValue::from_choice(&form.value);
                let answered = value.is_answered();
                responses.insert(name, value);
                answered
            }
            (form, _) => {
                let value = ResponseValue::from_scalar(form.value());
                let answered = value.is_answered();
                responses.insert(name, value);
                answered
            }
        };

        item.is_empty = item.source.item.required && !answered;
    }

    responses
}

/// Rebuilds the raw value the server records for `item` from a submission payload.
pub fn stored_value(item: &MaterializedItem, responses: &ResponseMap) -> Option<String> {
    let name = response_key(item.kind(), item.id());
    match &item.form {
        ItemForm::Multichoice(form)
            if item.kind() == ItemKind::Multichoice && form.subtype == Subtype::Checkbox =>
        {
            let checked: Vec<String> = (1..=form.choices.len())
                .filter_map(|index| match responses.get(&format!("{name}[{index}]")) {
                    Some(ResponseValue::Int(value)) if *value != 0 => Some(value.to_string()),
                    _ => None,
                })
                .collect();
            (!checked.is_empty()).then(|| checked.join(LINE_SEP))
        }
        _ => {
            let value = responses
                .get(&format!("{name}[0]"))
                .or_else(|| responses.get(&name))?;
            match value {
                ResponseValue::Int(0) => None,
                ResponseValue::Int(number) => Some(number.to_string()),
                ResponseValue::Text(text) if text.is_empty() => None,
                ResponseValue::Text(text) => Some(text.clone()),
            }
        }
    }
}

use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Item kinds as named by the feedback web services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Label,
    Info,
    Numeric,
    TextField,
    TextArea,
    Multichoice,
    MultichoiceRated,
    PageBreak,
    Captcha,
    #[serde(other)]
    Other,
}

impl ItemKind {
    /// Wire name, also used as the prefix of response keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Label => "label",
            ItemKind::Info => "info",
            ItemKind::Numeric => "numeric",
            ItemKind::TextField => "textfield",
            ItemKind::TextArea => "textarea",
            ItemKind::Multichoice => "multichoice",
            ItemKind::MultichoiceRated => "multichoicerated",
            ItemKind::PageBreak => "pagebreak",
            ItemKind::Captcha => "captcha",
            ItemKind::Other => "other",
        }
    }

    pub fn is_multichoice(&self) -> bool {
        matches!(self, ItemKind::Multichoice | ItemKind::MultichoiceRated)
    }
}

/// File embedded in an item's presentation text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ItemFile {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub filepath: String,
    pub fileurl: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
}

/// Item record as delivered by the upstream item source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ItemDescriptor {
    pub id: u64,
    #[serde(rename = "typ")]
    pub kind: ItemKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub presentation: String,
    #[serde(default, deserialize_with = "flag")]
    #[schemars(with = "bool")]
    pub required: bool,
    #[serde(rename = "hasvalue", default, deserialize_with = "flag")]
    #[schemars(with = "bool")]
    pub has_value: bool,
    #[serde(
        rename = "dependitem",
        default,
        deserialize_with = "depend_item",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<u64>")]
    pub depend_item: Option<u64>,
    #[serde(rename = "dependvalue", default)]
    pub depend_value: String,
    #[serde(default)]
    pub options: String,
    #[serde(rename = "otherdata", default)]
    pub other_data: String,
    #[serde(rename = "itemfiles", default, skip_serializing_if = "Vec::is_empty")]
    pub item_files: Vec<ItemFile>,
    #[serde(default)]
    pub position: u32,
}

impl ItemDescriptor {
    /// Minimal descriptor, mostly useful for callers building items by hand.
    pub fn new(id: u64, kind: ItemKind, presentation: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: String::new(),
            label: String::new(),
            presentation: presentation.into(),
            required: false,
            has_value: !matches!(kind, ItemKind::Label | ItemKind::PageBreak),
            depend_item: None,
            depend_value: String::new(),
            options: String::new(),
            other_data: String::new(),
            item_files: Vec::new(),
            position: 0,
        }
    }

    pub fn depends_on(mut self, item: u64, value: impl Into<String>) -> Self {
        self.depend_item = Some(item);
        self.depend_value = value.into();
        self
    }

    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// JSON schema of the item records accepted from item sources.
pub fn descriptor_schema() -> Schema {
    schema_for!(ItemDescriptor)
}

/// Item paired with the raw value recorded for it, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilledItem {
    #[serde(flatten)]
    pub item: ItemDescriptor,
    #[serde(rename = "rawValue", default, skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<String>,
}

impl FilledItem {
    pub fn new(item: ItemDescriptor, raw_value: Option<String>) -> Self {
        Self { item, raw_value }
    }
}

impl From<ItemDescriptor> for FilledItem {
    fn from(item: ItemDescriptor) -> Self {
        Self::new(item, None)
    }
}

impl AsRef<FilledItem> for FilledItem {
    fn as_ref(&self) -> &FilledItem {
        self
    }
}

/// Value held by a renderable item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ItemValue {
    #[default]
    Empty,
    Number(i64),
    Text(String),
}

impl ItemValue {
    pub fn is_empty(&self) -> bool {
        match self {
            ItemValue::Empty => true,
            ItemValue::Number(_) => false,
            ItemValue::Text(text) => text.is_empty(),
        }
    }
}

impl Serialize for ItemValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ItemValue::Empty => serializer.serialize_str(""),
            ItemValue::Number(value) => serializer.serialize_i64(*value),
            ItemValue::Text(text) => serializer.serialize_str(text),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ValueRepr {
    Number(i64),
    Text(String),
    Null(()),
}

impl<'de> Deserialize<'de> for ItemValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match ValueRepr::deserialize(deserializer)? {
            ValueRepr::Number(value) => ItemValue::Number(value),
            ValueRepr::Text(text) if text.is_empty() => ItemValue::Empty,
            ValueRepr::Text(text) => ItemValue::Text(text),
            ValueRepr::Null(()) => ItemValue::Empty,
        })
    }
}

/// Multichoice rendering style, encoded as a single letter before the type separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subtype {
    #[serde(rename = "r")]
    Radio,
    #[serde(rename = "c")]
    Checkbox,
    #[serde(rename = "d")]
    Dropdown,
}

impl Subtype {
    /// Unknown or empty codes render as radio buttons.
    pub fn from_code(code: &str) -> Self {
        match code {
            "c" => Subtype::Checkbox,
            "d" => Subtype::Dropdown,
            _ => Subtype::Radio,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Subtype::Radio => "r",
            Subtype::Checkbox => "c",
            Subtype::Dropdown => "d",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: u32,
    pub label: String,
    #[serde(default)]
    pub checked: bool,
}

impl Choice {
    pub fn new(value: u32, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            checked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceForm {
    pub subtype: Subtype,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub value: ItemValue,
}

impl ChoiceForm {
    pub fn checked_values(&self) -> Vec<u32> {
        self.choices
            .iter()
            .filter(|choice| choice.checked)
            .map(|choice| choice.value)
            .collect()
    }
}

/// Display modes of an info item, carried as an integer code in its presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfoMode {
    ResponseTime,
    Course,
    Category,
}

impl InfoMode {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(InfoMode::ResponseTime),
            2 => Some(InfoMode::Course),
            3 => Some(InfoMode::Category),
            _ => None,
        }
    }
}

/// Kind-specific shape of a renderable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemForm {
    Label {
        text: String,
    },
    Info {
        mode: InfoMode,
        text: String,
        #[serde(default)]
        value: ItemValue,
    },
    Numeric {
        range_from: Option<i64>,
        range_to: Option<i64>,
        #[serde(default)]
        value: ItemValue,
    },
    TextField {
        max_length: usize,
        #[serde(default)]
        value: ItemValue,
    },
    TextArea {
        #[serde(default)]
        value: ItemValue,
    },
    Multichoice(ChoiceForm),
    PageBreak,
    Captcha {
        #[serde(default)]
        value: ItemValue,
    },
}

impl ItemForm {
    /// Template tag used by renderers.
    pub fn template(&self) -> String {
        match self {
            ItemForm::Label { .. } | ItemForm::Info { .. } => "label".into(),
            ItemForm::Numeric { .. } => "numeric".into(),
            ItemForm::TextField { .. } => "textfield".into(),
            ItemForm::TextArea { .. } => "textarea".into(),
            ItemForm::Multichoice(form) => format!("multichoice-{}", form.subtype.code()),
            ItemForm::PageBreak => "pagebreak".into(),
            ItemForm::Captcha { .. } => "captcha".into(),
        }
    }

    pub fn value(&self) -> Option<&ItemValue> {
        match self {
            ItemForm::Info { value, .. }
            | ItemForm::Numeric { value, .. }
            | ItemForm::TextField { value, .. }
            | ItemForm::TextArea { value }
            | ItemForm::Captcha { value } => Some(value),
            ItemForm::Multichoice(form) => Some(&form.value),
            ItemForm::Label { .. } | ItemForm::PageBreak => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut ItemValue> {
        match self {
            ItemForm::Info { value, .. }
            | ItemForm::Numeric { value, .. }
            | ItemForm::TextField { value, .. }
            | ItemForm::TextArea { value }
            | ItemForm::Captcha { value } => Some(value),
            ItemForm::Multichoice(form) => Some(&mut form.value),
            ItemForm::Label { .. } | ItemForm::PageBreak => None,
        }
    }

    pub fn choices(&self) -> Option<&ChoiceForm> {
        match self {
            ItemForm::Multichoice(form) => Some(form),
            _ => None,
        }
    }

    pub fn choices_mut(&mut self) -> Option<&mut ChoiceForm> {
        match self {
            ItemForm::Multichoice(form) => Some(form),
            _ => None,
        }
    }
}

/// Renderable item: the filled source record plus its parsed form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterializedItem {
    #[serde(flatten)]
    pub source: FilledItem,
    pub form: ItemForm,
    #[serde(rename = "isEmpty", default)]
    pub is_empty: bool,
}

impl MaterializedItem {
    pub fn id(&self) -> u64 {
        self.source.item.id
    }

    pub fn kind(&self) -> ItemKind {
        self.source.item.kind
    }

    pub fn template(&self) -> String {
        self.form.template()
    }

    /// Current value re-encoded the way stored answers are recorded.
    ///
    /// Checkbox groups join the checked positions with `|`; `None` means unanswered.
    pub fn current_raw_value(&self) -> Option<String> {
        if let ItemForm::Multichoice(form) = &self.form
            && form.subtype == Subtype::Checkbox
        {
            let checked = form.checked_values();
            if checked.is_empty() {
                return None;
            }
            return Some(
                checked
                    .iter()
                    .map(u32::to_string)
                    .collect::<Vec<_>>()
                    .join(crate::presentation::LINE_SEP),
            );
        }

        match self.form.value()? {
            ItemValue::Empty => None,
            ItemValue::Number(value) => Some(value.to_string()),
            ItemValue::Text(text) => Some(text.clone()),
        }
    }
}

impl AsRef<FilledItem> for MaterializedItem {
    fn as_ref(&self) -> &FilledItem {
        &self.source
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Int(i64),
    Text(String),
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match FlagRepr::deserialize(deserializer)? {
        FlagRepr::Bool(value) => value,
        FlagRepr::Int(value) => value != 0,
        FlagRepr::Text(text) => !matches!(text.trim(), "" | "0" | "false"),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Int(u64),
    Text(String),
    Null(()),
}

fn depend_item<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let id = match IdRepr::deserialize(deserializer)? {
        IdRepr::Int(id) => id,
        IdRepr::Text(text) => text.trim().parse().unwrap_or(0),
        IdRepr::Null(()) => 0,
    };
    Ok((id > 0).then_some(id))
}

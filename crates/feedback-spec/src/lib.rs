#![allow(missing_docs)]

pub mod dependency;
pub mod i18n;
pub mod item;
pub mod materialize;
pub mod page;
pub mod presentation;
pub mod responses;
pub mod text;

pub use dependency::is_visible;
pub use i18n::{DefaultLocalizer, Localizer, MessageCatalog, ResolvedI18nMap, localized};
pub use item::{
    Choice, ChoiceForm, FilledItem, InfoMode, ItemDescriptor, ItemFile, ItemForm, ItemKind,
    ItemValue, MaterializedItem, Subtype, descriptor_schema,
};
pub use materialize::{materialize, materialize_all};
pub use page::{Page, assemble_page};
pub use presentation::{MultichoicePresentation, ParseContext, parse_item};
pub use responses::{ResponseMap, ResponseValue, encode_responses, stored_value};

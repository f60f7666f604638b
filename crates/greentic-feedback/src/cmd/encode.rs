use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use feedback_spec::{MaterializedItem, Page, ResponseMap, encode_responses};
use serde::{Deserialize, Serialize};

use super::print_json;

#[derive(Args, Debug, Clone)]
pub struct EncodeArgs {
    /// Page JSON as printed by `page`, or a bare array of its items
    #[arg(long = "page-file", value_name = "FILE")]
    pub page_file: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EncodeInput {
    Page(Page),
    Items(Vec<MaterializedItem>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedPage {
    pub responses: ResponseMap,
    /// Required items left unanswered.
    pub empty_items: Vec<u64>,
}

pub fn encode_items(mut items: Vec<MaterializedItem>) -> EncodedPage {
    let responses = encode_responses(&mut items);
    let empty_items = items
        .iter()
        .filter(|item| item.is_empty)
        .map(MaterializedItem::id)
        .collect();
    EncodedPage {
        responses,
        empty_items,
    }
}

pub fn encode_file(path: &Path) -> Result<EncodedPage> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let input: EncodeInput = serde_json::from_str(&raw)
        .with_context(|| format!("{} is neither a page nor an item list", path.display()))?;
    let items = match input {
        EncodeInput::Page(page) => page.items,
        EncodeInput::Items(items) => items,
    };
    Ok(encode_items(items))
}

pub fn run(args: &EncodeArgs) -> Result<()> {
    print_json(&encode_file(&args.page_file)?)
}

use feedback_spec::{
    DefaultLocalizer, FilledItem, ItemDescriptor, ItemKind, ItemValue, MaterializedItem,
    ParseContext, ResponseMap, ResponseValue, encode_responses, materialize, stored_value,
};

fn build(item: ItemDescriptor, raw: Option<&str>) -> MaterializedItem {
    let ctx = ParseContext::new(&DefaultLocalizer);
    materialize(FilledItem::new(item, raw.map(str::to_string)), &ctx).expect("renders")
}

fn int(value: i64) -> ResponseValue {
    ResponseValue::Int(value)
}

fn text(value: &str) -> ResponseValue {
    ResponseValue::Text(value.into())
}

#[test]
fn checkbox_group_encodes_control_cell_and_each_choice() {
    let mut item = build(ItemDescriptor::new(7, ItemKind::Multichoice, "c>>>>>A|B"), None);
    item.form.choices_mut().expect("choices").choices[0].checked = true;

    let mut items = vec![item];
    let responses = encode_responses(&mut items);

    let expected: ResponseMap = [
        ("multichoice_7[0]".to_string(), int(0)),
        ("multichoice_7[1]".to_string(), int(1)),
        ("multichoice_7[2]".to_string(), int(0)),
    ]
    .into_iter()
    .collect();
    assert_eq!(responses, expected);
    assert!(!items[0].is_empty);
}

#[test]
fn single_select_multichoice_uses_indexed_key() {
    let mut items = vec![
        build(ItemDescriptor::new(3, ItemKind::Multichoice, "r>>>>>Yes|No"), Some("2")),
        build(ItemDescriptor::new(4, ItemKind::Multichoice, "d>>>>>Yes|No"), None),
    ];
    let responses = encode_responses(&mut items);
    assert_eq!(responses.get("multichoice_3[0]"), Some(&int(2)));
    assert_eq!(responses.get("multichoice_4[0]"), Some(&int(0)));
    assert!(!responses.contains_key("multichoice_3"));
}

#[test]
fn rated_multichoice_uses_bare_key() {
    let mut items = vec![build(
        ItemDescriptor::new(5, ItemKind::MultichoiceRated, "r>>>>>1####Low|5####High"),
        Some("2"),
    )];
    let responses = encode_responses(&mut items);
    assert_eq!(responses.get("multichoicerated_5"), Some(&int(2)));
}

#[test]
fn scalar_items_use_bare_key_and_empty_string_default() {
    let mut items = vec![
        build(ItemDescriptor::new(1, ItemKind::TextField, "10|20"), Some("hello")),
        build(ItemDescriptor::new(2, ItemKind::TextArea, ""), None),
        build(ItemDescriptor::new(3, ItemKind::Numeric, "1|9"), Some("4")),
    ];
    let responses = encode_responses(&mut items);
    assert_eq!(responses.get("textfield_1"), Some(&text("hello")));
    assert_eq!(responses.get("textarea_2"), Some(&text("")));
    assert_eq!(responses.get("numeric_3"), Some(&int(4)));
}

#[test]
fn items_without_value_are_skipped_except_captcha() {
    let mut label = ItemDescriptor::new(1, ItemKind::Label, "Welcome");
    label.has_value = false;
    let mut captcha = ItemDescriptor::new(2, ItemKind::Captcha, "");
    captcha.has_value = false;
    let mut items = vec![build(label, None), build(captcha, None)];
    let responses = encode_responses(&mut items);
    assert_eq!(responses.len(), 1);
    assert_eq!(responses.get("captcha_2"), Some(&text("")));
}

#[test]
fn required_unanswered_items_are_flagged_empty() {
    let mut items = vec![
        build(
            ItemDescriptor::new(1, ItemKind::TextField, "").required(true),
            None,
        ),
        build(
            ItemDescriptor::new(2, ItemKind::TextField, "").required(true),
            Some("done"),
        ),
        build(ItemDescriptor::new(3, ItemKind::TextField, ""), None),
        build(
            ItemDescriptor::new(4, ItemKind::Multichoice, "c>>>>>A|B").required(true),
            None,
        ),
    ];
    items[2].is_empty = true;

    encode_responses(&mut items);
    let flags: Vec<bool> = items.iter().map(|item| item.is_empty).collect();
    assert_eq!(flags, vec![true, false, false, true]);
}

#[test]
fn zero_numeric_answer_counts_as_unanswered() {
    let mut items = vec![build(
        ItemDescriptor::new(9, ItemKind::Numeric, "-5|5").required(true),
        Some("0"),
    )];
    assert_eq!(items[0].form.value(), Some(&ItemValue::Number(0)));

    let responses = encode_responses(&mut items);
    assert_eq!(responses.get("numeric_9"), Some(&text("")));
    assert!(items[0].is_empty);
}

#[test]
fn negative_numeric_answer_is_answered() {
    let mut items = vec![build(
        ItemDescriptor::new(9, ItemKind::Numeric, "-5|5").required(true),
        Some("-3"),
    )];
    let responses = encode_responses(&mut items);
    assert_eq!(responses.get("numeric_9"), Some(&int(-3)));
    assert!(!items[0].is_empty);
}

#[test]
fn response_time_info_submits_marker() {
    let mut items = vec![build(ItemDescriptor::new(6, ItemKind::Info, "1"), None)];
    let responses = encode_responses(&mut items);
    assert_eq!(
        responses.get("info_6"),
        Some(&text("__CURRENT__TIMESTAMP__"))
    );
}

#[test]
fn checkbox_selection_survives_encode_and_reload() {
    let descriptor = ItemDescriptor::new(11, ItemKind::Multichoice, "c>>>>>A|B|C|D");
    let mut item = build(descriptor.clone(), None);
    for index in [1, 3] {
        item.form.choices_mut().expect("choices").choices[index].checked = true;
    }
    let before = item.form.choices().expect("choices").checked_values();

    let mut items = vec![item];
    let responses = encode_responses(&mut items);
    let raw = stored_value(&items[0], &responses).expect("stored value");
    assert_eq!(raw, "2|4");

    let reloaded = build(descriptor, Some(&raw));
    assert_eq!(reloaded.form.choices().expect("choices").checked_values(), before);
}

#[test]
fn response_map_serializes_as_flat_object() {
    let mut items = vec![
        build(ItemDescriptor::new(1, ItemKind::TextField, ""), Some("a")),
        build(ItemDescriptor::new(2, ItemKind::Multichoice, "r>>>>>x|y"), Some("1")),
    ];
    let responses = encode_responses(&mut items);
    let json = serde_json::to_value(&responses).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({ "textfield_1": "a", "multichoice_2[0]": 1 })
    );
}

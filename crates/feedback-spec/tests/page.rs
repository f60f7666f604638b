use feedback_spec::{
    DefaultLocalizer, FilledItem, ItemDescriptor, ItemKind, ParseContext, assemble_page,
};

fn item(id: u64, kind: ItemKind, presentation: &str, raw: Option<&str>) -> FilledItem {
    FilledItem::new(
        ItemDescriptor::new(id, kind, presentation),
        raw.map(str::to_string),
    )
}

fn page_break(id: u64) -> FilledItem {
    item(id, ItemKind::PageBreak, "", None)
}

fn ids(items: &[feedback_spec::MaterializedItem]) -> Vec<u64> {
    items.iter().map(|item| item.id()).collect()
}

#[test]
fn first_page_stops_at_first_break() {
    let ctx = ParseContext::new(&DefaultLocalizer);
    let items = vec![
        item(1, ItemKind::TextField, "", Some("x")),
        FilledItem::new(
            ItemDescriptor::new(2, ItemKind::TextField, "").depends_on(1, "x"),
            None,
        ),
        page_break(3),
        item(4, ItemKind::TextArea, "", None),
    ];

    let page = assemble_page(&items, 0, &ctx);
    assert_eq!(ids(&page.items), vec![1, 2]);
    assert!(!page.has_prev_page);
    assert!(page.has_next_page);
}

#[test]
fn same_page_dependency_is_visible_regardless_of_value() {
    let ctx = ParseContext::new(&DefaultLocalizer);
    let items = vec![
        item(1, ItemKind::TextField, "", Some("other")),
        FilledItem::new(
            ItemDescriptor::new(2, ItemKind::TextField, "").depends_on(1, "x"),
            None,
        ),
        page_break(3),
    ];
    let page = assemble_page(&items, 0, &ctx);
    assert_eq!(ids(&page.items), vec![1, 2]);
}

#[test]
fn later_pages_filter_on_earlier_answers() {
    let ctx = ParseContext::new(&DefaultLocalizer);
    let items = vec![
        item(1, ItemKind::Multichoice, "r>>>>>Yes|No", Some("1")),
        page_break(2),
        FilledItem::new(
            ItemDescriptor::new(3, ItemKind::TextArea, "").depends_on(1, "Yes"),
            None,
        ),
        FilledItem::new(
            ItemDescriptor::new(4, ItemKind::TextArea, "").depends_on(1, "No"),
            None,
        ),
        item(5, ItemKind::Numeric, "1|10", Some("3")),
    ];

    let page = assemble_page(&items, 1, &ctx);
    assert_eq!(ids(&page.items), vec![3, 5]);
    assert!(page.has_prev_page);
    assert!(!page.has_next_page);
}

#[test]
fn middle_page_reports_both_neighbours() {
    let ctx = ParseContext::new(&DefaultLocalizer);
    let items = vec![
        item(1, ItemKind::TextField, "", None),
        page_break(2),
        item(3, ItemKind::TextField, "", None),
        page_break(4),
        item(5, ItemKind::TextField, "", None),
        page_break(6),
        item(7, ItemKind::TextField, "", None),
    ];
    let page = assemble_page(&items, 1, &ctx);
    assert_eq!(ids(&page.items), vec![3]);
    assert!(page.has_prev_page);
    assert!(page.has_next_page);
}

#[test]
fn page_beyond_the_end_is_empty() {
    let ctx = ParseContext::new(&DefaultLocalizer);
    let items = vec![item(1, ItemKind::TextField, "", None), page_break(2)];
    let page = assemble_page(&items, 3, &ctx);
    assert!(page.items.is_empty());
    assert!(page.has_prev_page);
    assert!(!page.has_next_page);
}

#[test]
fn unrenderable_items_are_dropped_from_the_page() {
    let ctx = ParseContext::new(&DefaultLocalizer);
    let items = vec![
        item(1, ItemKind::Other, "", None),
        item(2, ItemKind::Info, "42", None),
        item(3, ItemKind::Captcha, "", None),
    ];
    let page = assemble_page(&items, 0, &ctx);
    assert_eq!(ids(&page.items), vec![3]);
    assert!(!page.has_next_page);
}

#[test]
fn trailing_break_still_reports_next_page() {
    let ctx = ParseContext::new(&DefaultLocalizer);
    let items = vec![item(1, ItemKind::TextField, "", None), page_break(2)];
    let page = assemble_page(&items, 0, &ctx);
    assert!(page.has_next_page);
}

use feedback_spec::{FilledItem, ItemDescriptor, ItemKind, is_visible};

fn answered(item: ItemDescriptor, raw: Option<&str>) -> FilledItem {
    FilledItem::new(item, raw.map(str::to_string))
}

fn dependent_on(target: u64, value: &str) -> ItemDescriptor {
    ItemDescriptor::new(100, ItemKind::TextField, "").depends_on(target, value)
}

#[test]
fn items_without_dependency_are_visible() {
    let item = ItemDescriptor::new(1, ItemKind::TextField, "");
    assert!(is_visible::<FilledItem>(&item, &[]));
}

#[test]
fn missing_dependency_target_fails_open() {
    let preceding = vec![answered(
        ItemDescriptor::new(1, ItemKind::TextField, ""),
        Some("x"),
    )];
    for value in ["", "x", "anything"] {
        assert!(is_visible(&dependent_on(42, value), &preceding));
    }
}

#[test]
fn label_targets_always_hide() {
    let preceding = vec![answered(ItemDescriptor::new(1, ItemKind::Label, "Intro"), None)];
    for value in ["", "Intro", "x"] {
        assert!(!is_visible(&dependent_on(1, value), &preceding));
    }
}

#[test]
fn scalar_targets_compare_raw_value() {
    let preceding = vec![
        answered(ItemDescriptor::new(1, ItemKind::TextField, ""), Some("yes")),
        answered(ItemDescriptor::new(2, ItemKind::Numeric, ""), None),
    ];
    assert!(is_visible(&dependent_on(1, "yes"), &preceding));
    assert!(!is_visible(&dependent_on(1, "Yes"), &preceding));
    assert!(!is_visible(&dependent_on(2, ""), &preceding));
}

#[test]
fn radio_target_matches_selected_label() {
    let target = ItemDescriptor::new(1, ItemKind::Multichoice, "r>>>>>Yes|No");
    let preceding = vec![answered(target, Some("2"))];
    assert!(is_visible(&dependent_on(1, "No"), &preceding));
    assert!(!is_visible(&dependent_on(1, "Yes"), &preceding));
}

#[test]
fn dropdown_target_matches_label_before_adjust_separator() {
    let target = ItemDescriptor::new(1, ItemKind::Multichoice, "d>>>>>A|B<<<<<1");
    let preceding = vec![answered(target, Some("2"))];
    assert!(is_visible(&dependent_on(1, "B"), &preceding));
    assert!(!is_visible(&dependent_on(1, "A"), &preceding));
}

#[test]
fn unanswered_multichoice_target_hides() {
    let target = ItemDescriptor::new(1, ItemKind::Multichoice, "c>>>>>Yes|No");
    let preceding = vec![answered(target, None)];
    assert!(!is_visible(&dependent_on(1, "Yes"), &preceding));
}

#[test]
fn checkbox_target_matches_any_selected_label() {
    let target = ItemDescriptor::new(1, ItemKind::Multichoice, "c>>>>>Red|Green|Blue<<<<<1");
    let preceding = vec![answered(target, Some("1|3"))];
    assert!(is_visible(&dependent_on(1, "Blue"), &preceding));
    assert!(is_visible(&dependent_on(1, "Red"), &preceding));
    assert!(!is_visible(&dependent_on(1, "Green"), &preceding));
}

#[test]
fn labels_are_trimmed_before_comparison() {
    let target = ItemDescriptor::new(1, ItemKind::Multichoice, "r>>>>> Yes | No ");
    let preceding = vec![answered(target, Some("1"))];
    assert!(is_visible(&dependent_on(1, "Yes"), &preceding));
    assert!(!is_visible(&dependent_on(1, "yes"), &preceding));
}

#[test]
fn rated_target_compares_label_without_weight() {
    let target = ItemDescriptor::new(
        1,
        ItemKind::MultichoiceRated,
        "c>>>>>1####Poor|2####Fair|3####Good",
    );
    let preceding = vec![answered(target, Some("2"))];
    assert!(is_visible(&dependent_on(1, "Fair"), &preceding));
    assert!(!is_visible(&dependent_on(1, "(2) Fair"), &preceding));
    assert!(!is_visible(&dependent_on(1, "Good"), &preceding));
}

#[test]
fn dependency_reads_presentation_not_live_choices() {
    let ctx = feedback_spec::ParseContext::new(&feedback_spec::DefaultLocalizer);
    let target = ItemDescriptor::new(1, ItemKind::Multichoice, "r>>>>>Yes|No");
    let mut materialized =
        feedback_spec::materialize(answered(target, Some("1")), &ctx).expect("renders");
    if let Some(form) = materialized.form.choices_mut() {
        for choice in &mut form.choices {
            choice.label = "edited".into();
        }
    }
    assert!(is_visible(&dependent_on(1, "Yes"), &[materialized]));
}

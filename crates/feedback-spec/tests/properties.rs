use proptest::prelude::*;

use feedback_spec::{
    DefaultLocalizer, FilledItem, ItemDescriptor, ItemForm, ItemKind, ParseContext, is_visible,
    parse_item,
};

fn cell() -> impl Strategy<Value = String> {
    "[A-Za-z ]{0,12}"
}

proptest! {
    #[test]
    fn numeric_bounds_round_trip(from in -100_000i64..100_000, to in -100_000i64..100_000) {
        let ctx = ParseContext::new(&DefaultLocalizer);
        let item = ItemDescriptor::new(1, ItemKind::Numeric, format!("{from}|{to}"));
        let form = parse_item(&item, &ctx).expect("numeric renders");
        let ItemForm::Numeric { range_from, range_to, .. } = form else {
            panic!("expected numeric form");
        };
        prop_assert_eq!(range_from, Some(from));
        prop_assert_eq!(range_to, Some(to));
    }

    #[test]
    fn choice_count_is_cells_plus_sentinel(
        cells in prop::collection::vec(cell(), 1..8),
        subtype in prop::sample::select(vec!["r", "c", "d"]),
        hide in any::<bool>(),
    ) {
        let ctx = ParseContext::new(&DefaultLocalizer);
        let presentation = format!("{subtype}>>>>>{}", cells.join("|"));
        let options = if hide { "h" } else { "" };
        let item = ItemDescriptor::new(2, ItemKind::Multichoice, presentation).with_options(options);
        let form = parse_item(&item, &ctx).expect("multichoice renders");
        let choices = &form.choices().expect("choices").choices;

        let sentinel = match subtype {
            "r" => !hide,
            "d" => true,
            _ => false,
        };
        prop_assert_eq!(choices.len(), cells.len() + usize::from(sentinel));
        for (position, choice) in choices.iter().skip(usize::from(sentinel)).enumerate() {
            prop_assert_eq!(choice.value as usize, position + 1);
        }
    }

    #[test]
    fn absent_dependency_target_is_always_visible(value in ".{0,16}", target in 50u64..1000) {
        let preceding = vec![FilledItem::new(
            ItemDescriptor::new(1, ItemKind::Label, "x"),
            None,
        )];
        let item = ItemDescriptor::new(2, ItemKind::TextField, "").depends_on(target, value);
        prop_assert!(is_visible(&item, &preceding));
    }

    #[test]
    fn label_dependency_is_never_visible(value in ".{0,16}") {
        let preceding = vec![FilledItem::new(
            ItemDescriptor::new(1, ItemKind::Label, "x"),
            Some(value.clone()),
        )];
        let item = ItemDescriptor::new(2, ItemKind::TextField, "").depends_on(1, value);
        prop_assert!(!is_visible(&item, &preceding));
    }
}

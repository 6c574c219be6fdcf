use schemagraph_dsl::{make_property, DeclarationError, Tag, ValueType};
use proptest::prelude::*;

fn ident() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,16}").unwrap()
}

fn value_type() -> impl Strategy<Value = ValueType> {
    proptest::sample::select(ValueType::ALL.to_vec())
}

fn tags() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(
        prop_oneof![
            Just("Military".to_string()),
            Just("Language".to_string()),
            Just("Religion".to_string()),
            proptest::string::string_regex("[A-Z][a-z]{1,8}").unwrap(),
        ],
        0..5,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn factory_accepts_every_vocabulary_entry(
        id in ident(),
        ty in value_type(),
        tags in tags(),
        label in ".{0,24}",
        description in ".{0,64}",
    ) {
        let p = make_property(id.clone(), ty.as_str(), tags.clone(), label, description, "Conflict")
            .expect("valid declaration");
        prop_assert_eq!(p.identifier(), id.as_str());
        prop_assert_eq!(p.value_type(), ty);
        for tag in &tags {
            prop_assert!(p.tags().contains(&Tag::from(tag.as_str())));
        }
        prop_assert!(p.tags().len() <= tags.len());
    }

    #[test]
    fn factory_rejects_names_outside_the_vocabulary(name in "[A-Z][a-zA-Z]{0,12}") {
        prop_assume!(name.parse::<ValueType>().is_err());
        let err = make_property("x", &name, ["Military"], "X", "", "Conflict").unwrap_err();
        prop_assert_eq!(err, DeclarationError::InvalidValueType { value: name });
    }
}

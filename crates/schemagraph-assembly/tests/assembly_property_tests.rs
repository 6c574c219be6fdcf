use proptest::prelude::*;
use schemagraph_assembly::{assemble, AssemblyError};
use schemagraph_dsl::{make_class, make_property, Declaration, ValueType};

/// A valid batch: `classes` classes and properties owned by them, with some
/// properties authored twice.
fn valid_batch() -> impl Strategy<Value = Vec<Declaration>> {
    (1usize..5, 0usize..12).prop_flat_map(|(classes, props)| {
        (
            Just(classes),
            proptest::collection::vec(
                (
                    0..classes,
                    proptest::sample::select(ValueType::ALL.to_vec()),
                    any::<bool>(),
                ),
                props,
            ),
        )
            .prop_map(|(classes, props)| {
                let mut out: Vec<Declaration> = (0..classes)
                    .map(|i| {
                        let id = format!("Class{i}");
                        make_class(id.clone(), id, "").unwrap().into()
                    })
                    .collect();
                for (i, (owner, ty, twice)) in props.into_iter().enumerate() {
                    let p: Declaration = make_property(
                        format!("prop_{i}"),
                        ty.as_str(),
                        ["Military"],
                        format!("Prop {i}"),
                        "",
                        format!("Class{owner}"),
                    )
                    .unwrap()
                    .into();
                    if twice {
                        out.push(p.clone());
                    }
                    out.push(p);
                }
                out
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn duplicating_every_declaration_changes_nothing(batch in valid_batch()) {
        let doubled: Vec<Declaration> = batch
            .iter()
            .flat_map(|d| [d.clone(), d.clone()])
            .collect();
        prop_assert_eq!(assemble(batch).unwrap(), assemble(doubled).unwrap());
    }

    #[test]
    fn permutations_assemble_to_the_same_content(
        (batch, shuffled) in valid_batch().prop_flat_map(|b| (Just(b.clone()), Just(b).prop_shuffle()))
    ) {
        let a = assemble(batch).unwrap();
        let b = assemble(shuffled).unwrap();
        prop_assert!(a.is_semantically_equal(&b));
        prop_assert_eq!(a.content_digest(), b.content_digest());
    }

    #[test]
    fn dropping_the_classes_leaves_properties_unresolved(batch in valid_batch()) {
        let props_only: Vec<Declaration> = batch
            .into_iter()
            .filter(|d| d.as_property().is_some())
            .collect();
        let has_props = !props_only.is_empty();
        let result = assemble(props_only);
        if has_props {
            let unknown_class = matches!(result, Err(AssemblyError::UnknownClass { .. }));
            prop_assert!(unknown_class);
        } else {
            prop_assert!(result.is_ok());
        }
    }
}

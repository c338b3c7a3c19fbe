//! Property-based tests for the atomic counter extension.
//!
//! For any schema and any outgoing item:
//! - items with no counter attribute come back unchanged
//! - otherwise the replacement keeps every attribute, with counters set to
//!   their start value and everything else untouched
//! - partial updates always come back unchanged

use docmap_extensions::{AtomicCounterExtension, BeforeWriteContext, OperationName, WriteExtension};
use docmap_model::{AttributeSchema, AttributeTag, AttributeValue, Item, TableSchema, resolve_counter};
use proptest::prelude::*;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn value_strategy() -> impl Strategy<Value = AttributeValue> {
    prop_oneof![
        any::<i64>().prop_map(AttributeValue::number),
        "[a-z]{0,12}".prop_map(AttributeValue::S),
        any::<bool>().prop_map(AttributeValue::Bool),
    ]
}

/// Attribute names `a0..a7`; each sampled index in `counters` is tagged with
/// its delta and start value, the rest stay untagged.
fn schema(counters: &[(usize, i64, i64)]) -> TableSchema {
    let mut builder = TableSchema::builder("t")
        .add_attribute(AttributeSchema::string("id").tag(AttributeTag::partition_key()));
    for &(idx, delta, start) in counters {
        builder = builder.add_attribute(
            AttributeSchema::number(format!("a{idx}"))
                .tag(AttributeTag::atomic_counter_with(delta, start)),
        );
    }
    builder.build().unwrap()
}

fn counters_strategy() -> impl Strategy<Value = Vec<(usize, i64, i64)>> {
    prop::collection::btree_map(0usize..8, (any::<i64>(), any::<i64>()), 0..4)
        .prop_map(|m| m.into_iter().map(|(i, (d, s))| (i, d, s)).collect())
}

fn item_strategy() -> impl Strategy<Value = Item> {
    prop::collection::hash_map(
        (0usize..8).prop_map(|i| format!("a{i}")),
        value_strategy(),
        0..8,
    )
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn counters_are_reset_and_others_preserved(
        counters in counters_strategy(),
        item in item_strategy(),
    ) {
        let schema = schema(&counters);
        let metadata = schema.table_metadata();
        let ctx = BeforeWriteContext::new(&item, metadata, OperationName::PutItem);
        let modification = AtomicCounterExtension::create().before_write(&ctx);

        let has_counter = item.keys().any(|k| metadata.is_counter(k));
        prop_assert_eq!(modification.is_unchanged(), !has_counter);

        if let Some(out) = modification.transformed_item() {
            prop_assert_eq!(out.len(), item.len());
            for (name, value) in &item {
                let expected = match resolve_counter(name, metadata) {
                    Some(c) => AttributeValue::number(c.start_value()),
                    None => value.clone(),
                };
                prop_assert_eq!(out.get(name), Some(&expected));
            }
        }
    }

    #[test]
    fn caller_value_never_survives(
        delta in any::<i64>(),
        start in any::<i64>(),
        caller in any::<i64>(),
    ) {
        prop_assume!(caller != start);
        let schema = schema(&[(0, delta, start)]);
        let item = Item::from([
            ("id".to_string(), AttributeValue::string("x")),
            ("a0".to_string(), AttributeValue::number(caller)),
        ]);
        let ctx = BeforeWriteContext::new(&item, schema.table_metadata(), OperationName::PutItem);
        let out = AtomicCounterExtension::create()
            .before_write(&ctx)
            .into_transformed_item()
            .unwrap();

        prop_assert_eq!(out.get("a0").and_then(AttributeValue::as_i64), Some(start));
    }

    #[test]
    fn schema_tags_exactly_the_sampled_indices(counters in counters_strategy()) {
        let schema = schema(&counters);
        let metadata = schema.table_metadata();
        for idx in 0..8 {
            let expected = counters
                .iter()
                .find(|&&(i, _, _)| i == idx)
                .map(|&(_, delta, start)| (delta, start));
            let actual = resolve_counter(&format!("a{idx}"), metadata)
                .map(|c| (c.delta(), c.start_value()));
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn updates_are_never_rewritten(
        counters in counters_strategy(),
        item in item_strategy(),
    ) {
        let schema = schema(&counters);
        let ctx = BeforeWriteContext::new(&item, schema.table_metadata(), OperationName::UpdateItem);
        prop_assert!(AtomicCounterExtension::create().before_write(&ctx).is_unchanged());
    }
}

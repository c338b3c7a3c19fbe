use docmap_extensions::{AtomicCounterExtension, ExtensionChain};
use docmap_model::{AttributeSchema, AttributeTag, AttributeValue, Item, TableSchema};
use docmap_store::{MemoryTable, StoreError};
use pretty_assertions::assert_eq;
use std::io::Write;

const STRING_VALUE: &str = "string value";
const RECORD_ID: &str = "id123";

fn records_schema() -> TableSchema {
    TableSchema::builder("records")
        .add_attribute(AttributeSchema::string("id").tag(AttributeTag::partition_key()))
        .add_attribute(AttributeSchema::string("attribute1"))
        .add_attribute(AttributeSchema::number("defaultCounter").tag(AttributeTag::atomic_counter()))
        .add_attribute(
            AttributeSchema::number("customCounter").tag(AttributeTag::atomic_counter_with(5, 10)),
        )
        .add_attribute(
            AttributeSchema::number("decreasingCounter")
                .tag(AttributeTag::atomic_counter_with(-1, -20)),
        )
        .build()
        .unwrap()
}

fn counter_table() -> MemoryTable {
    MemoryTable::new(
        records_schema(),
        ExtensionChain::new().with(AtomicCounterExtension::create()),
    )
}

fn record(extra: &[(&str, AttributeValue)]) -> Item {
    let mut item = Item::from([
        ("id".to_string(), AttributeValue::string(RECORD_ID)),
        ("attribute1".to_string(), AttributeValue::string(STRING_VALUE)),
    ]);
    for (k, v) in extra {
        item.insert(k.to_string(), v.clone());
    }
    item
}

fn key() -> Item {
    Item::from([("id".to_string(), AttributeValue::string(RECORD_ID))])
}

fn counter(table: &MemoryTable, name: &str) -> Option<i64> {
    table
        .get_item(&key())
        .unwrap()
        .and_then(|item| item.get(name).and_then(AttributeValue::as_i64))
}

// ── Native update path ───────────────────────────────────────────

#[test]
fn default_counter_increments_on_each_update() {
    let table = counter_table();

    table.update_item(record(&[])).unwrap();
    assert_eq!(counter(&table, "defaultCounter"), Some(1));

    table.update_item(record(&[])).unwrap();
    assert_eq!(counter(&table, "defaultCounter"), Some(2));

    let stored = table.get_item(&key()).unwrap().unwrap();
    assert_eq!(stored.get("attribute1"), Some(&AttributeValue::string(STRING_VALUE)));
}

#[test]
fn setting_counter_value_has_no_effect_on_update() {
    let table = counter_table();
    table
        .update_item(record(&[("defaultCounter", AttributeValue::number(10))]))
        .unwrap();
    assert_eq!(counter(&table, "defaultCounter"), Some(1));
}

#[test]
fn custom_counter_starts_from_start_plus_delta() {
    let table = counter_table();
    table.update_item(record(&[])).unwrap();
    assert_eq!(counter(&table, "customCounter"), Some(15));
    table.update_item(record(&[])).unwrap();
    assert_eq!(counter(&table, "customCounter"), Some(20));
}

#[test]
fn counter_can_decrease() {
    let table = counter_table();
    table.update_item(record(&[])).unwrap();
    assert_eq!(counter(&table, "decreasingCounter"), Some(-21));
}

#[test]
fn update_works_without_the_extension() {
    let table = MemoryTable::new(records_schema(), ExtensionChain::new());
    table.update_item(record(&[])).unwrap();
    table.update_item(record(&[])).unwrap();
    assert_eq!(counter(&table, "defaultCounter"), Some(2));
}

#[test]
fn update_returns_full_item() {
    let table = counter_table();
    let out = table.update_item(record(&[])).unwrap();
    assert_eq!(out.get("id"), Some(&AttributeValue::string(RECORD_ID)));
    assert_eq!(out.get("defaultCounter"), Some(&AttributeValue::number(1)));
    assert_eq!(out.get("customCounter"), Some(&AttributeValue::number(15)));
    assert_eq!(out.get("decreasingCounter"), Some(&AttributeValue::number(-21)));
}

#[test]
fn update_null_removes_attribute() {
    let table = counter_table();
    table.update_item(record(&[])).unwrap();
    let out = table
        .update_item(record(&[("attribute1", AttributeValue::Null(true))]))
        .unwrap();
    assert!(!out.contains_key("attribute1"));
}

// ── Unconditional write path ─────────────────────────────────────

#[test]
fn counter_initialized_with_put() {
    let table = counter_table();
    table
        .put_item(record(&[
            ("defaultCounter", AttributeValue::number(999)),
            ("customCounter", AttributeValue::number(999)),
        ]))
        .unwrap();

    let stored = table.get_item(&key()).unwrap().unwrap();
    assert_eq!(stored.get("attribute1"), Some(&AttributeValue::string(STRING_VALUE)));
    assert_eq!(counter(&table, "defaultCounter"), Some(0));
    assert_eq!(counter(&table, "customCounter"), Some(10));
}

#[test]
fn repeated_puts_never_advance_counter_but_updates_do() {
    let table = counter_table();
    let with_counter = || record(&[("customCounter", AttributeValue::number(999))]);

    for _ in 0..3 {
        table.put_item(with_counter()).unwrap();
        assert_eq!(counter(&table, "customCounter"), Some(10));
    }

    table.update_item(record(&[])).unwrap();
    assert_eq!(counter(&table, "customCounter"), Some(15));
    table.update_item(record(&[])).unwrap();
    assert_eq!(counter(&table, "customCounter"), Some(20));

    table.put_item(with_counter()).unwrap();
    assert_eq!(counter(&table, "customCounter"), Some(10));
}

#[test]
fn put_without_extension_keeps_caller_value() {
    let table = MemoryTable::new(records_schema(), ExtensionChain::new());
    table
        .put_item(record(&[("defaultCounter", AttributeValue::number(999))]))
        .unwrap();
    assert_eq!(counter(&table, "defaultCounter"), Some(999));

    table.update_item(record(&[])).unwrap();
    assert_eq!(counter(&table, "defaultCounter"), Some(1000));
}

#[test]
fn put_replaces_previous_item() {
    let table = counter_table();
    table
        .put_item(record(&[("other", AttributeValue::Bool(true))]))
        .unwrap();
    table.put_item(record(&[])).unwrap();

    let stored = table.get_item(&key()).unwrap().unwrap();
    assert!(!stored.contains_key("other"));
    assert_eq!(table.len(), 1);
}

// ── Keys and errors ──────────────────────────────────────────────

#[test]
fn missing_partition_key_is_rejected() {
    let table = counter_table();
    let err = table
        .put_item(Item::from([("attribute1".to_string(), AttributeValue::string("x"))]))
        .unwrap_err();
    assert!(matches!(err, StoreError::MissingKeyAttribute(ref a) if a == "id"));
}

#[test]
fn wrong_key_type_is_rejected() {
    let table = counter_table();
    let err = table
        .get_item(&Item::from([("id".to_string(), AttributeValue::number(1))]))
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidKeyType { .. }));
}

#[test]
fn mistagged_counter_surfaces_as_type_mismatch() {
    let schema = TableSchema::builder("t")
        .add_attribute(AttributeSchema::string("id").tag(AttributeTag::partition_key()))
        .add_attribute(AttributeSchema::string("label").tag(AttributeTag::atomic_counter()))
        .build()
        .unwrap();
    let table = MemoryTable::new(schema, ExtensionChain::new());
    table
        .put_item(Item::from([
            ("id".to_string(), AttributeValue::string("a")),
            ("label".to_string(), AttributeValue::string("text")),
        ]))
        .unwrap();

    let err = table.update_item(Item::from([("id".to_string(), AttributeValue::string("a"))]));
    assert!(matches!(err, Err(StoreError::TypeMismatch { ref attribute, .. }) if attribute == "label"));
}

#[test]
fn counter_overflow_is_reported() {
    let schema = TableSchema::builder("t")
        .add_attribute(AttributeSchema::string("id").tag(AttributeTag::partition_key()))
        .add_attribute(AttributeSchema::number("n").tag(AttributeTag::atomic_counter_with(1, i64::MAX)))
        .build()
        .unwrap();
    let table = MemoryTable::new(schema, ExtensionChain::new());
    let key = Item::from([("id".to_string(), AttributeValue::string("a"))]);

    assert!(matches!(
        table.update_item(key),
        Err(StoreError::CounterOverflow(ref a)) if a == "n"
    ));
}

#[test]
fn sort_key_distinguishes_items() {
    let schema = TableSchema::builder("events")
        .add_attribute(AttributeSchema::string("pk").tag(AttributeTag::partition_key()))
        .add_attribute(AttributeSchema::number("sk").tag(AttributeTag::sort_key()))
        .add_attribute(AttributeSchema::number("hits").tag(AttributeTag::atomic_counter()))
        .build()
        .unwrap();
    let table = MemoryTable::new(schema, ExtensionChain::new().with(AtomicCounterExtension::create()));
    let key = |sk: i64| {
        Item::from([
            ("pk".to_string(), AttributeValue::string("p")),
            ("sk".to_string(), AttributeValue::number(sk)),
        ])
    };

    table.update_item(key(1)).unwrap();
    table.update_item(key(1)).unwrap();
    table.update_item(key(2)).unwrap();

    assert_eq!(table.len(), 2);
    let hits = |sk| table.get_item(&key(sk)).unwrap().unwrap()["hits"].as_i64();
    assert_eq!(hits(1), Some(2));
    assert_eq!(hits(2), Some(1));
}

fn number_keyed_table() -> MemoryTable {
    let schema = TableSchema::builder("scores")
        .add_attribute(AttributeSchema::number("id").tag(AttributeTag::partition_key()))
        .add_attribute(AttributeSchema::number("hits").tag(AttributeTag::atomic_counter()))
        .build()
        .unwrap();
    MemoryTable::new(schema, ExtensionChain::new().with(AtomicCounterExtension::create()))
}

fn number_key(raw: &str) -> Item {
    Item::from([("id".to_string(), AttributeValue::N(raw.to_string()))])
}

#[test]
fn equal_number_keys_address_one_item() {
    let table = number_keyed_table();
    table.put_item(number_key("1")).unwrap();
    table.put_item(number_key("1.0")).unwrap();
    table.put_item(number_key("01")).unwrap();

    assert_eq!(table.len(), 1);
    assert!(table.get_item(&number_key("10e-1")).unwrap().is_some());
}

#[test]
fn updates_through_equal_number_keys_share_a_counter() {
    let table = number_keyed_table();
    table.update_item(number_key("7")).unwrap();
    let item = table.update_item(number_key("7.00")).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(item["hits"].as_i64(), Some(2));
}

#[test]
fn malformed_number_key_is_rejected() {
    let table = number_keyed_table();
    let err = table.put_item(number_key("abc")).unwrap_err();
    assert!(matches!(err, StoreError::MalformedNumberKey { ref attribute, .. } if attribute == "id"));
    assert!(table.is_empty());
}

#[test]
fn delete_item_removes_and_returns() {
    let table = counter_table();
    table.put_item(record(&[])).unwrap();
    let removed = table.delete_item(&key()).unwrap();
    assert!(removed.is_some());
    assert!(table.is_empty());
    assert_eq!(table.delete_item(&key()).unwrap(), None);
}

// ── Concurrency ──────────────────────────────────────────────────

#[test]
fn concurrent_puts_all_leave_start_value() {
    let table = counter_table();
    std::thread::scope(|s| {
        for i in 0..8 {
            let table = &table;
            s.spawn(move || {
                for j in 0..50 {
                    table
                        .put_item(record(&[("customCounter", AttributeValue::number(i * 100 + j))]))
                        .unwrap();
                }
            });
        }
    });
    assert_eq!(counter(&table, "customCounter"), Some(10));
}

#[test]
fn concurrent_updates_are_not_lost() {
    let table = counter_table();
    std::thread::scope(|s| {
        for _ in 0..8 {
            let table = &table;
            s.spawn(move || {
                for _ in 0..25 {
                    table.update_item(record(&[])).unwrap();
                }
            });
        }
    });
    assert_eq!(counter(&table, "defaultCounter"), Some(200));
}

// ── Config files ─────────────────────────────────────────────────

const TABLE_TOML: &str = r#"
[table]
name = "records"

[[table.attributes]]
name = "id"
type = "string"
partition_key = true

[[table.attributes]]
name = "balance"
type = "number"
atomic_counter = { delta = -5, start_value = 15 }

[extensions]
atomic_counter = true
"#;

#[test]
fn table_from_config_file_registers_extension() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TABLE_TOML.as_bytes()).unwrap();
    let table = MemoryTable::from_config_file(file.path()).unwrap();

    let id = Item::from([("id".to_string(), AttributeValue::string("y"))]);
    let mut item = id.clone();
    item.insert("balance".into(), AttributeValue::number(1));
    table.put_item(item).unwrap();
    assert_eq!(
        table.get_item(&id).unwrap().unwrap()["balance"],
        AttributeValue::number(15)
    );

    let out = table.update_item(id.clone()).unwrap();
    assert_eq!(out["balance"], AttributeValue::number(10));
}

#[test]
fn table_from_config_without_extensions_leaves_puts_alone() {
    let toml_str = TABLE_TOML.replace("atomic_counter = true", "atomic_counter = false");
    let table = MemoryTable::from_config_str(&toml_str).unwrap();
    assert!(table.extensions().is_empty());

    let item = Item::from([
        ("id".to_string(), AttributeValue::string("y")),
        ("balance".to_string(), AttributeValue::number(1)),
    ]);
    table.put_item(item.clone()).unwrap();
    assert_eq!(table.scan(), vec![item]);
}

#[test]
fn missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = MemoryTable::from_config_file(dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
}

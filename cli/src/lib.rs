//! Script format and table description for the `docmap` tool.

use docmap_model::{CounterConfig, Item};
use docmap_store::{MemoryTable, StoreResult};
use serde::{Deserialize, Serialize};

/// One step of a write script.
///
/// ```json
/// [
///   {"op": "put", "item": {"id": {"S": "x"}, "count": {"N": "999"}}},
///   {"op": "update", "item": {"id": {"S": "x"}}},
///   {"op": "get", "key": {"id": {"S": "x"}}}
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Put { item: Item },
    Update { item: Item },
    Get { key: Item },
    Delete { key: Item },
}

/// Result of one script step: the item written, read or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub op: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
}

/// Runs every operation in order, stopping at the first failure.
pub fn run_script(table: &MemoryTable, operations: Vec<Operation>) -> StoreResult<Vec<Outcome>> {
    let mut outcomes = Vec::with_capacity(operations.len());
    for operation in operations {
        let outcome = match operation {
            Operation::Put { item } => {
                let key = key_of(table, &item);
                table.put_item(item)?;
                Outcome {
                    op: "put",
                    item: table.get_item(&key)?,
                }
            }
            Operation::Update { item } => Outcome {
                op: "update",
                item: Some(table.update_item(item)?),
            },
            Operation::Get { key } => Outcome {
                op: "get",
                item: table.get_item(&key)?,
            },
            Operation::Delete { key } => Outcome {
                op: "delete",
                item: table.delete_item(&key)?,
            },
        };
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

/// Only the primary key attributes of `item`.
fn key_of(table: &MemoryTable, item: &Item) -> Item {
    let metadata = table.schema().table_metadata();
    metadata
        .primary_key_names()
        .filter_map(|name| item.get(name).map(|v| (name.to_string(), v.clone())))
        .collect()
}

/// Printable summary of a table's keys, counters and extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDescription {
    pub table: String,
    pub partition_key: Option<String>,
    pub sort_key: Option<String>,
    pub counters: Vec<CounterBinding>,
    pub extensions: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterBinding {
    pub attribute: String,
    #[serde(flatten)]
    pub config: CounterConfig,
}

pub fn describe(table: &MemoryTable) -> TableDescription {
    let schema = table.schema();
    let metadata = schema.table_metadata();
    let mut counters: Vec<CounterBinding> = metadata
        .counters()
        .map(|(attribute, config)| CounterBinding {
            attribute: attribute.to_string(),
            config,
        })
        .collect();
    counters.sort_by(|a, b| a.attribute.cmp(&b.attribute));

    TableDescription {
        table: schema.table_name().to_string(),
        partition_key: metadata.partition_key().map(str::to_string),
        sort_key: metadata.sort_key().map(str::to_string),
        counters,
        extensions: table.extensions().names().collect(),
    }
}

use crate::{StoreError, StoreResult, TableConfig};
use docmap_extensions::{BeforeWriteContext, ExtensionChain, OperationName, WriteModification};
use docmap_model::{AttributeValue, AttributeValueType, Item, TableSchema};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Primary key of a stored item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ItemKey {
    partition: KeyComponent,
    sort: Option<KeyComponent>,
}

/// Number key components are canonical: `1`, `1.0`, `01` and `10e-1` are
/// all the same key, as they are in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum KeyComponent {
    S(String),
    N {
        negative: bool,
        digits: String,
        exponent: i64,
    },
    B(Vec<u8>),
}

impl KeyComponent {
    /// Canonical form `±0.digits × 10^exponent` with no leading or trailing
    /// zeros in `digits`. Zero is the empty digit string. `None` if `raw` is
    /// not a decimal number.
    fn number(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (negative, unsigned) = match raw.as_bytes().first()? {
            b'-' => (true, &raw[1..]),
            b'+' => (false, &raw[1..]),
            _ => (false, raw),
        };
        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(at) => (&unsigned[..at], unsigned[at + 1..].parse::<i64>().ok()?),
            None => (unsigned, 0),
        };
        let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if int.is_empty() && frac.is_empty() {
            return None;
        }
        if !int.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }

        let mut point = i64::try_from(int.len()).ok()?.checked_add(exponent)?;
        let joined = format!("{int}{frac}");
        let without_leading = joined.trim_start_matches('0');
        point = point.checked_sub(i64::try_from(joined.len() - without_leading.len()).ok()?)?;
        let digits = without_leading.trim_end_matches('0');

        if digits.is_empty() {
            return Some(Self::N {
                negative: false,
                digits: String::new(),
                exponent: 0,
            });
        }
        Some(Self::N {
            negative,
            digits: digits.to_string(),
            exponent: point,
        })
    }
}

/// A single in-memory table.
///
/// Safe to share across threads; every write takes the table's write lock
/// for the duration of the read-modify-write.
pub struct MemoryTable {
    schema: Arc<TableSchema>,
    extensions: ExtensionChain,
    rows: RwLock<HashMap<ItemKey, Item>>,
}

impl MemoryTable {
    /// Creates an empty table with the given write extensions.
    pub fn new(schema: TableSchema, extensions: ExtensionChain) -> Self {
        info!(
            table = schema.table_name(),
            extensions = ?extensions,
            "Created table"
        );
        Self {
            schema: Arc::new(schema),
            extensions,
            rows: RwLock::new(HashMap::new()),
        }
    }

    pub fn from_config(config: TableConfig) -> Self {
        let chain = config.extensions.build_chain();
        Self::new(config.schema, chain)
    }

    pub fn from_config_str(toml_str: &str) -> StoreResult<Self> {
        Ok(Self::from_config(TableConfig::from_toml_str(toml_str)?))
    }

    /// Loads a table config file and creates an empty table from it.
    pub fn from_config_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let config = TableConfig::load_from(path)?;
        info!(path = ?path, "Loaded table config");
        Ok(Self::from_config(config))
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn extensions(&self) -> &ExtensionChain {
        &self.extensions
    }

    /// Writes a full item, replacing any item with the same primary key.
    pub fn put_item(&self, item: Item) -> StoreResult<()> {
        let item = self.run_extensions(item, OperationName::PutItem);
        let key = self.key_of(&item)?;
        debug!(table = self.schema.table_name(), ?key, "put_item");
        self.rows.write().insert(key, item);
        Ok(())
    }

    /// Applies a partial update and returns the full item after it.
    ///
    /// Non-key attributes of `item` are set on the stored item (a `NULL` value
    /// removes the attribute); the item is created if it does not exist. Every
    /// atomic counter of the schema is then incremented natively, ignoring any
    /// counter value in `item`.
    pub fn update_item(&self, item: Item) -> StoreResult<Item> {
        let item = self.run_extensions(item, OperationName::UpdateItem);
        let key = self.key_of(&item)?;
        let metadata = self.schema.table_metadata();

        let mut rows = self.rows.write();
        let mut updated = rows.get(&key).cloned().unwrap_or_default();

        for (name, value) in item {
            if metadata.is_counter(&name) {
                continue;
            }
            if matches!(value, AttributeValue::Null(_)) && !metadata.is_primary_key(&name) {
                updated.remove(&name);
            } else {
                updated.insert(name, value);
            }
        }

        for (name, counter) in metadata.counters() {
            let current = match updated.get(name) {
                None => None,
                Some(value) => Some(value.as_i64().ok_or_else(|| StoreError::TypeMismatch {
                    attribute: name.to_string(),
                    found: value.value_type(),
                })?),
            };
            let next = counter
                .next_value(current)
                .ok_or_else(|| StoreError::CounterOverflow(name.to_string()))?;
            updated.insert(name.to_string(), AttributeValue::number(next));
        }

        debug!(table = self.schema.table_name(), ?key, "update_item");
        rows.insert(key, updated.clone());
        Ok(updated)
    }

    /// Reads an item by primary key. Extra attributes in `key` are ignored.
    pub fn get_item(&self, key: &Item) -> StoreResult<Option<Item>> {
        let key = self.key_of(key)?;
        Ok(self.rows.read().get(&key).cloned())
    }

    /// Deletes an item by primary key, returning it if it existed.
    pub fn delete_item(&self, key: &Item) -> StoreResult<Option<Item>> {
        let key = self.key_of(key)?;
        Ok(self.rows.write().remove(&key))
    }

    /// All stored items, in no particular order.
    pub fn scan(&self) -> Vec<Item> {
        self.rows.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    fn run_extensions(&self, item: Item, operation: OperationName) -> Item {
        let context = BeforeWriteContext::new(&item, self.schema.table_metadata(), operation);
        match self.extensions.before_write(&context) {
            WriteModification::Replace(transformed) => transformed,
            WriteModification::Unchanged => item,
        }
    }

    fn key_of(&self, item: &Item) -> StoreResult<ItemKey> {
        let metadata = self.schema.table_metadata();
        let partition_name = metadata
            .partition_key()
            .ok_or_else(|| StoreError::MissingKeyAttribute(String::new()))?;
        let partition = self.key_component(partition_name, item)?;
        let sort = metadata
            .sort_key()
            .map(|name| self.key_component(name, item))
            .transpose()?;
        Ok(ItemKey { partition, sort })
    }

    fn key_component(&self, name: &str, item: &Item) -> StoreResult<KeyComponent> {
        let value = item
            .get(name)
            .ok_or_else(|| StoreError::MissingKeyAttribute(name.to_string()))?;
        let expected = self
            .schema
            .table_metadata()
            .key_attribute_type(name)
            .unwrap_or(AttributeValueType::String);
        let component = match value {
            AttributeValue::S(s) if expected == AttributeValueType::String => KeyComponent::S(s.clone()),
            AttributeValue::N(n) if expected == AttributeValueType::Number => {
                KeyComponent::number(n).ok_or_else(|| StoreError::MalformedNumberKey {
                    attribute: name.to_string(),
                    value: n.clone(),
                })?
            }
            AttributeValue::B(b) if expected == AttributeValueType::Binary => KeyComponent::B(b.clone()),
            other => {
                return Err(StoreError::InvalidKeyType {
                    attribute: name.to_string(),
                    expected,
                    found: other.value_type(),
                });
            }
        };
        Ok(component)
    }
}

impl std::fmt::Debug for MemoryTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryTable")
            .field("table", &self.schema.table_name())
            .field("extensions", &self.extensions)
            .field("items", &self.len())
            .finish()
    }
}

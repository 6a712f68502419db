//! Daily shop trade tables: the root `daily_shop` table and the pool tables it references.
//! Loaded from `<install>/minecraft/config/dailyshop/trade_tables/<name>.json`.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::config::Strictness;
use crate::data::validate::validate_table;
use crate::error::{ExtractError, Result};

pub const ROOT_TABLE_NAME: &str = "daily_shop";

/// Namespace assumed for ids written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Root table: a weighted list of pool tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopTable {
    /// Roll strategy; only checked for presence.
    pub roll: Value,
    pub pool: Vec<PoolReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolReference {
    /// Name of the pool table, without extension.
    pub value: String,
    pub weight: f64,
}

/// One pool: a single input cost and a weighted list of output items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolTable {
    pub roll: Value,
    pub input1: Cost,
    pub output: Vec<OutputItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    pub filter: String,
    pub count: CountSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountSpec {
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputItem {
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<CountSpec>,
    pub weight: f64,
}

/// A `namespace:path` item id, e.g. `minecraft:emerald_block`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId {
    pub namespace: String,
    pub path: String,
}

impl ItemId {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let (namespace, path) = match raw.split_once(':') {
            Some((namespace, path)) => (namespace, path),
            None => (DEFAULT_NAMESPACE, raw),
        };
        if namespace.is_empty() || path.is_empty() || path.contains(':') {
            return Err(ExtractError::InvalidItemId(raw.to_string()));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

pub fn table_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.json"))
}

/// Load `<dir>/<name>.json`, run the shape check when `strictness` asks for it,
/// then deserialize into `T`.
pub fn read_table<T: DeserializeOwned>(
    dir: &Path,
    name: &str,
    strictness: Strictness,
) -> Result<T> {
    let path = table_path(dir, name);
    let raw = fs::read_to_string(&path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ExtractError::TableNotFound { path: path.clone() },
        _ => ExtractError::TableRead {
            path: path.clone(),
            source,
        },
    })?;

    let value: Value = serde_json::from_str(&raw).map_err(|source| ExtractError::TableParse {
        table: name.to_string(),
        source,
    })?;

    if strictness == Strictness::Strict {
        let report = validate_table(name, &value);
        for diag in &report.diagnostics {
            tracing::debug!(table = name, "{}: {} {}", diag.severity, diag.context, diag.message);
        }
        if report.has_errors() {
            return Err(ExtractError::InvalidTable {
                table: name.to_string(),
                diagnostics: report.into_errors(),
            });
        }
    }

    let table = serde_json::from_value(value).map_err(|source| ExtractError::TableParse {
        table: name.to_string(),
        source,
    })?;
    tracing::debug!(table = name, path = %path.display(), "loaded table");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn item_id_splits_namespace() {
        let id = ItemId::parse("cobblemon:poke_ball").expect("id");
        assert_eq!(id.namespace, "cobblemon");
        assert_eq!(id.path, "poke_ball");
        assert_eq!(id.to_string(), "cobblemon:poke_ball");
    }

    #[test]
    fn bare_item_id_defaults_to_minecraft() {
        let id = ItemId::parse("emerald").expect("id");
        assert_eq!(id.namespace, DEFAULT_NAMESPACE);
        assert_eq!(id.path, "emerald");
    }

    #[test]
    fn malformed_item_ids_are_rejected() {
        for raw in ["", ":emerald", "minecraft:", "a:b:c"] {
            assert!(ItemId::parse(raw).is_err(), "expected '{raw}' to be rejected");
        }
    }

    #[test]
    fn missing_table_reports_attempted_path() {
        let dir = TempDir::new().unwrap();
        let err =
            read_table::<ShopTable>(dir.path(), "daily_shop", Strictness::Strict).unwrap_err();
        match err {
            ExtractError::TableNotFound { path } => {
                assert_eq!(path, dir.path().join("daily_shop.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn pool_table_deserializes() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("pool_a.json"),
            r#"{
                "roll": {"type": "weighted"},
                "input1": {"filter": "minecraft:emerald", "count": {"count": 12}},
                "output": [
                    {"item": "cobblemon:poke_ball", "count": {"count": 4}, "weight": 3},
                    {"item": "cobblemon:great_ball", "weight": 1.5}
                ]
            }"#,
        )
        .unwrap();

        let pool: PoolTable = read_table(dir.path(), "pool_a", Strictness::Strict).expect("pool");
        assert_eq!(pool.input1.count.count, 12);
        assert_eq!(pool.output.len(), 2);
        assert_eq!(pool.output[0].count, Some(CountSpec { count: 4 }));
        assert_eq!(pool.output[1].weight, 1.5);
    }

    #[test]
    fn strict_mode_reports_diagnostics() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("daily_shop.json"),
            r#"{"pool": [{"value": "pool_a", "weight": "heavy"}]}"#,
        )
        .unwrap();

        let err =
            read_table::<ShopTable>(dir.path(), "daily_shop", Strictness::Strict).unwrap_err();
        match err {
            ExtractError::InvalidTable { table, diagnostics } => {
                assert_eq!(table, "daily_shop");
                assert_eq!(diagnostics.len(), 2, "missing roll and non-numeric weight");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn lenient_mode_still_rejects_unusable_shapes() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("daily_shop.json"),
            r#"{"roll": {}, "pool": [{"value": "pool_a", "weight": "heavy"}]}"#,
        )
        .unwrap();

        let err =
            read_table::<ShopTable>(dir.path(), "daily_shop", Strictness::Lenient).unwrap_err();
        assert!(matches!(err, ExtractError::TableParse { .. }));
    }
}

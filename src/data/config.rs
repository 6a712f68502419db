//! Extractor configuration, read once from `daily_shop_extract_config.json`.
//! Key names follow the config files already in circulation (upper snake case).

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ExtractError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "daily_shop_extract_config.json";

/// Placeholder in `COBBLEMON_DIR` that expands to the user's home directory.
pub const HOME_DIR_PLACEHOLDER: &str = "${HOME_DIR}";

/// Trade tables live under this path relative to the install root.
pub const TRADE_TABLES_SUBDIR: [&str; 4] = ["minecraft", "config", "dailyshop", "trade_tables"];

/// Data columns written for every row: item, mod, cost, base value, chance.
pub const DATA_COLUMN_COUNT: usize = 5;

const DEFAULT_COIN_COLUMNS: [&str; 3] = ["Gold Coins", "Iron Coins", "Copper Coins"];

/// Whether tables get the shape check before they are deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    Strict,
    Lenient,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "COBBLEMON_DIR")]
    cobblemon_dir: String,
    #[serde(rename = "OUTPUT_FILE_NAME")]
    output_file_name: String,
    #[serde(rename = "COIN_OUTPUT_FILE_NAME", default)]
    coin_output_file_name: Option<String>,
    #[serde(rename = "CSV_SEPARATOR", default = "default_separator")]
    csv_separator: String,
    #[serde(rename = "CSV_COLUMNS")]
    csv_columns: Vec<String>,
    #[serde(rename = "COIN_COLUMNS", default)]
    coin_columns: Option<Vec<String>>,
    #[serde(rename = "FUN_MODE", default)]
    fun_mode: bool,
    #[serde(rename = "VALIDATE_TABLES", default = "default_validate")]
    validate_tables: bool,
    #[serde(rename = "PERCENT_DECIMALS", default = "default_decimals")]
    percent_decimals: usize,
}

fn default_separator() -> String {
    ",".to_string()
}

fn default_validate() -> bool {
    true
}

fn default_decimals() -> usize {
    2
}

/// Resolved configuration for one run. Passed by reference to every stage.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    pub install_dir: PathBuf,
    pub output_path: PathBuf,
    pub coin_output_path: Option<PathBuf>,
    pub delimiter: u8,
    pub columns: Vec<String>,
    pub coin_columns: Vec<String>,
    pub fun_mode: bool,
    pub strictness: Strictness,
    pub percent_decimals: usize,
}

impl ExtractConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ExtractError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &raw)
    }

    /// Parse config text; `path` is only used for error messages.
    pub fn from_json(path: &Path, raw: &str) -> Result<Self> {
        let parsed: RawConfig =
            serde_json::from_str(raw).map_err(|source| ExtractError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        let home = home_dir();
        Self::resolve(parsed, home.as_deref())
    }

    fn resolve(raw: RawConfig, home: Option<&Path>) -> Result<Self> {
        let delimiter = parse_delimiter(&raw.csv_separator)?;

        if raw.csv_columns.len() != DATA_COLUMN_COUNT {
            return Err(ExtractError::InvalidConfig(format!(
                "CSV_COLUMNS must name {DATA_COLUMN_COUNT} columns, got {}",
                raw.csv_columns.len()
            )));
        }

        let coin_columns = match raw.coin_columns {
            Some(columns) if columns.len() != DEFAULT_COIN_COLUMNS.len() => {
                return Err(ExtractError::InvalidConfig(format!(
                    "COIN_COLUMNS must name {} columns, got {}",
                    DEFAULT_COIN_COLUMNS.len(),
                    columns.len()
                )));
            }
            Some(columns) => columns,
            None => DEFAULT_COIN_COLUMNS.iter().map(|c| c.to_string()).collect(),
        };

        let install_dir = PathBuf::from(expand_placeholders(&raw.cobblemon_dir, home)?);
        let output_path = PathBuf::from(expand_placeholders(&raw.output_file_name, home)?);
        let coin_output_path = raw
            .coin_output_file_name
            .as_deref()
            .map(|name| expand_placeholders(name, home).map(PathBuf::from))
            .transpose()?;

        Ok(Self {
            install_dir,
            output_path,
            coin_output_path,
            delimiter,
            columns: raw.csv_columns,
            coin_columns,
            fun_mode: raw.fun_mode,
            strictness: if raw.validate_tables {
                Strictness::Strict
            } else {
                Strictness::Lenient
            },
            percent_decimals: raw.percent_decimals,
        })
    }

    pub fn tables_dir(&self) -> PathBuf {
        TRADE_TABLES_SUBDIR
            .iter()
            .fold(self.install_dir.clone(), |dir, part| dir.join(part))
    }

    /// Header row for the coin breakdown file: data columns then coin columns.
    pub fn coin_header(&self) -> Vec<String> {
        self.columns
            .iter()
            .chain(self.coin_columns.iter())
            .cloned()
            .collect()
    }
}

fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

fn parse_delimiter(raw: &str) -> Result<u8> {
    match raw.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(ExtractError::InvalidConfig(format!(
            "CSV_SEPARATOR must be a single ASCII character, got '{raw}'"
        ))),
    }
}

/// Expand `${HOME_DIR}` to `home`, then `${NAME}` and `$NAME` from the environment.
/// Unknown variables are left as written.
pub fn expand_placeholders(raw: &str, home: Option<&Path>) -> Result<String> {
    let with_home = if raw.contains(HOME_DIR_PLACEHOLDER) {
        let home = home.ok_or(ExtractError::HomeDirUnavailable)?;
        raw.replace(HOME_DIR_PLACEHOLDER, &home.to_string_lossy())
    } else {
        raw.to_string()
    };
    Ok(expand_env_vars(&with_home, |name| env::var(name).ok()))
}

fn expand_env_vars(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('$') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };

        match (name.is_empty(), lookup(name)) {
            (false, Some(value)) => out.push_str(&value),
            _ => out.push_str(&rest[start..start + 1 + consumed]),
        }
        rest = &after[consumed..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "COBBLEMON_DIR": "/srv/cobblemon",
        "OUTPUT_FILE_NAME": "daily_shop.csv",
        "CSV_COLUMNS": ["Item", "Mod", "Cost", "Emerald Value", "Chance"]
    }"#;

    fn parse(raw: &str, home: Option<&Path>) -> Result<ExtractConfig> {
        let parsed: RawConfig = serde_json::from_str(raw).expect("fixture should parse");
        ExtractConfig::resolve(parsed, home)
    }

    #[test]
    fn optional_keys_take_defaults() {
        let config = parse(MINIMAL, None).expect("config");
        assert_eq!(config.delimiter, b',');
        assert!(!config.fun_mode);
        assert_eq!(config.strictness, Strictness::Strict);
        assert_eq!(config.percent_decimals, 2);
        assert_eq!(config.coin_output_path, None);
        assert_eq!(
            config.coin_header(),
            vec![
                "Item",
                "Mod",
                "Cost",
                "Emerald Value",
                "Chance",
                "Gold Coins",
                "Iron Coins",
                "Copper Coins",
            ]
        );
    }

    #[test]
    fn tables_dir_appends_trade_tables_path() {
        let config = parse(MINIMAL, None).expect("config");
        assert_eq!(
            config.tables_dir(),
            Path::new("/srv/cobblemon/minecraft/config/dailyshop/trade_tables")
        );
    }

    #[test]
    fn missing_required_key_is_a_parse_error() {
        let err = ExtractConfig::from_json(
            Path::new("cfg.json"),
            r#"{"COBBLEMON_DIR": "/x", "CSV_COLUMNS": []}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ExtractError::ConfigParse { .. }));
        assert!(err.to_string().contains("OUTPUT_FILE_NAME"));
    }

    #[test]
    fn multi_character_separator_is_rejected() {
        let raw = MINIMAL.replace("\"CSV_COLUMNS\"", "\"CSV_SEPARATOR\": \";;\", \"CSV_COLUMNS\"");
        let err = parse(&raw, None).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidConfig(_)));
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        let raw = MINIMAL.replace("\"Chance\"", "\"Chance\", \"Extra\"");
        assert!(matches!(parse(&raw, None), Err(ExtractError::InvalidConfig(_))));
    }

    #[test]
    fn home_placeholder_expands() {
        let raw = MINIMAL.replace("/srv/cobblemon", "${HOME_DIR}/games/cobblemon");
        let config = parse(&raw, Some(Path::new("/home/player"))).expect("config");
        assert_eq!(config.install_dir, Path::new("/home/player/games/cobblemon"));
    }

    #[test]
    fn home_placeholder_without_home_fails() {
        let raw = MINIMAL.replace("/srv/cobblemon", "${HOME_DIR}/cobblemon");
        assert!(matches!(parse(&raw, None), Err(ExtractError::HomeDirUnavailable)));
    }

    #[test]
    fn env_vars_expand_and_unknown_ones_stay() {
        let lookup = |name: &str| (name == "GAMES").then(|| "/opt/games".to_string());
        assert_eq!(expand_env_vars("${GAMES}/cobblemon", lookup), "/opt/games/cobblemon");
        assert_eq!(expand_env_vars("$GAMES/x", lookup), "/opt/games/x");
        assert_eq!(expand_env_vars("${NOPE}/x", lookup), "${NOPE}/x");
        assert_eq!(expand_env_vars("cost$", lookup), "cost$");
        assert_eq!(expand_env_vars("${open", lookup), "${open");
    }
}

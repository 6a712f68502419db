pub mod config;
pub mod table;
pub mod validate;

pub use config::{ExtractConfig, Strictness, DEFAULT_CONFIG_PATH};
pub use table::{
    read_table, Cost, CountSpec, ItemId, OutputItem, PoolReference, PoolTable, ShopTable,
    ROOT_TABLE_NAME,
};
pub use validate::{validate_table, ValidationDiagnostic, ValidationReport, ValidationSeverity};

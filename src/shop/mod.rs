//! Daily shop extraction: load tables, compute per-item chances and costs, write CSV.

pub mod currency;
pub mod export_csv;
pub mod probability;

use std::path::{Path, PathBuf};

use crate::console::Reporter;
use crate::data::config::{ExtractConfig, Strictness};
use crate::data::table::{read_table, PoolTable, ShopTable, ROOT_TABLE_NAME};
use crate::error::Result;

pub use currency::{
    coin_breakdown, format_cost, format_percentage, parse_cost_value, CoinBreakdown, CurrencyUnit,
    EMERALDS_PER_BLOCK,
};
pub use export_csv::{sort_rows, write_rows, write_rows_to, CsvLayout};
pub use probability::{
    checked_item_weight, checked_total_weight, derive_pool_rows, derive_rows,
    ensure_entry_weight, ensure_positive_weight, pool_cost, pool_probabilities, total_item_weight,
    total_weight, ItemProbability, PoolCost,
};

/// One output line: an item of one pool with its chance and cost.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRow {
    pub item_name: String,
    pub mod_name: String,
    /// Display cost, e.g. `48 x Emerald Block`.
    pub cost: String,
    /// Cost in emeralds.
    pub base_value: u64,
    /// Chance of appearing in a shop roll, in `[0, 1]`.
    pub probability: f64,
    pub percentage: String,
    pub coins: CoinBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub pool_count: usize,
    pub row_count: usize,
    pub outputs: Vec<PathBuf>,
}

fn log_strictness(config: &ExtractConfig) {
    if config.strictness == Strictness::Lenient {
        tracing::warn!("table validation is disabled; malformed tables fail at deserialization");
    }
}

/// Full run: read every table, then write the emerald CSV (and the coin CSV when configured).
/// Nothing is written unless every table loads.
pub fn run_extraction(config: &ExtractConfig, reporter: &Reporter) -> Result<ExtractionSummary> {
    log_strictness(config);
    reporter.start();

    let dir = config.tables_dir();
    let shop: ShopTable = read_table(&dir, ROOT_TABLE_NAME, config.strictness)?;
    reporter.table_loaded(ROOT_TABLE_NAME);

    let shop_total = checked_total_weight(&shop)?;
    reporter.shop_weight(shop_total);

    let mut rows = Vec::new();
    for pool_ref in &shop.pool {
        reporter.pool_header(&pool_ref.value);
        let pool: PoolTable = read_table(&dir, &pool_ref.value, config.strictness)?;
        reporter.table_loaded(&pool_ref.value);
        reporter.pool_weight(total_item_weight(&pool));
        let cost = pool_cost(&pool)?;
        reporter.pool_cost(&cost.display);

        let pool_rows =
            derive_pool_rows(pool_ref, shop_total, &pool, &cost, config.percent_decimals)?;
        for row in &pool_rows {
            reporter.item(row);
        }
        rows.extend(pool_rows);
    }

    sort_rows(&mut rows);

    let mut outputs = vec![config.output_path.clone()];
    write_rows(
        &config.output_path,
        config.delimiter,
        &config.columns,
        &rows,
        CsvLayout::Emerald,
    )?;
    if let Some(coin_path) = &config.coin_output_path {
        write_rows(
            coin_path,
            config.delimiter,
            &config.coin_header(),
            &rows,
            CsvLayout::Coins,
        )?;
        outputs.push(coin_path.clone());
    }

    let written: Vec<&Path> = outputs.iter().map(PathBuf::as_path).collect();
    reporter.finished(&written);

    Ok(ExtractionSummary {
        pool_count: shop.pool.len(),
        row_count: rows.len(),
        outputs,
    })
}

/// Load and check every table and compute the rows without writing anything.
pub fn validate_tables(config: &ExtractConfig, reporter: &Reporter) -> Result<ExtractionSummary> {
    log_strictness(config);

    let dir = config.tables_dir();
    let shop: ShopTable = read_table(&dir, ROOT_TABLE_NAME, config.strictness)?;
    let pools = shop
        .pool
        .iter()
        .map(|pool_ref| read_table::<PoolTable>(&dir, &pool_ref.value, config.strictness))
        .collect::<Result<Vec<_>>>()?;

    let rows = derive_rows(
        &shop,
        shop.pool.iter().zip(pools.iter()),
        config.percent_decimals,
    )?;
    reporter.validated(shop.pool.len(), rows.len());

    Ok(ExtractionSummary {
        pool_count: shop.pool.len(),
        row_count: rows.len(),
        outputs: Vec::new(),
    })
}

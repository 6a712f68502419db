//! Appearance probabilities for a two-stage shop roll: first a pool is drawn
//! from the root table by weight, then an item is drawn from that pool by weight.

use crate::data::table::{ItemId, PoolReference, PoolTable, ShopTable, ROOT_TABLE_NAME};
use crate::error::{ExtractError, Result};
use crate::shop::currency::{
    coin_breakdown, format_cost, format_item_name, format_mod_name, format_percentage,
    parse_cost_value, CurrencyUnit,
};
use crate::shop::DerivedRow;

/// Sum of pool weights in the root table.
pub fn total_weight(shop: &ShopTable) -> f64 {
    shop.pool.iter().map(|entry| entry.weight).sum()
}

/// Sum of output item weights in one pool.
pub fn total_item_weight(pool: &PoolTable) -> f64 {
    pool.output.iter().map(|item| item.weight).sum()
}

/// Reject totals that would be used as a divisor.
pub fn ensure_positive_weight(total: f64, table: &str) -> Result<f64> {
    if total.is_finite() && total > 0.0 {
        Ok(total)
    } else {
        Err(ExtractError::ZeroWeight {
            table: table.to_string(),
        })
    }
}

/// A single entry weight must be finite and non-negative.
pub fn ensure_entry_weight(weight: f64, table: &str, entry: &str) -> Result<f64> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(weight)
    } else {
        Err(ExtractError::InvalidWeight {
            table: table.to_string(),
            entry: entry.to_string(),
            weight,
        })
    }
}

/// Total pool weight of the root table, with every entry checked first.
pub fn checked_total_weight(shop: &ShopTable) -> Result<f64> {
    for entry in &shop.pool {
        ensure_entry_weight(entry.weight, ROOT_TABLE_NAME, &entry.value)?;
    }
    ensure_positive_weight(total_weight(shop), ROOT_TABLE_NAME)
}

/// Total item weight of the pool `table`, with every entry checked first.
pub fn checked_item_weight(pool: &PoolTable, table: &str) -> Result<f64> {
    for item in &pool.output {
        ensure_entry_weight(item.weight, table, &item.item)?;
    }
    ensure_positive_weight(total_item_weight(pool), table)
}

/// The single `input1` cost of a pool, resolved to emeralds.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolCost {
    pub item: ItemId,
    pub count: u64,
    pub unit: CurrencyUnit,
    pub base_value: u64,
    pub display: String,
}

pub fn pool_cost(pool: &PoolTable) -> Result<PoolCost> {
    let item = ItemId::parse(&pool.input1.filter)?;
    let count = pool.input1.count.count;
    let unit = CurrencyUnit::from_item_name(&item.path);
    Ok(PoolCost {
        display: format_cost(count, &item.path),
        base_value: unit.base_value(count),
        item,
        count,
        unit,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemProbability {
    pub item: ItemId,
    pub percentage_in_pool: f64,
    pub percentage_in_shop: f64,
}

/// Per-item probabilities for one pool. `shop_total` is the root table's total weight.
pub fn pool_probabilities(
    pool_ref: &PoolReference,
    shop_total: f64,
    pool: &PoolTable,
) -> Result<Vec<ItemProbability>> {
    let shop_total = ensure_positive_weight(shop_total, ROOT_TABLE_NAME)?;
    let pool_weight = ensure_entry_weight(pool_ref.weight, ROOT_TABLE_NAME, &pool_ref.value)?;
    let item_total = checked_item_weight(pool, &pool_ref.value)?;
    let pool_share = pool_weight / shop_total;

    pool.output
        .iter()
        .map(|output| {
            let percentage_in_pool = output.weight / item_total;
            Ok(ItemProbability {
                item: ItemId::parse(&output.item)?,
                percentage_in_pool,
                percentage_in_shop: percentage_in_pool * pool_share,
            })
        })
        .collect()
}

/// Rows for every output item of one pool. `cost` is the pool's resolved [`pool_cost`].
pub fn derive_pool_rows(
    pool_ref: &PoolReference,
    shop_total: f64,
    pool: &PoolTable,
    cost: &PoolCost,
    percent_decimals: usize,
) -> Result<Vec<DerivedRow>> {
    debug_assert_eq!(parse_cost_value(&cost.display), cost.base_value);
    let coins = coin_breakdown(cost.base_value);

    let rows = pool_probabilities(pool_ref, shop_total, pool)?
        .into_iter()
        .map(|probability| DerivedRow {
            item_name: format_item_name(&probability.item.path),
            mod_name: format_mod_name(&probability.item.namespace),
            cost: cost.display.clone(),
            base_value: cost.base_value,
            probability: probability.percentage_in_shop,
            percentage: format_percentage(probability.percentage_in_shop, percent_decimals),
            coins,
        })
        .collect();
    Ok(rows)
}

/// Flatten every pool into rows. `pools` pairs each root entry with its loaded table.
pub fn derive_rows<'a>(
    shop: &ShopTable,
    pools: impl IntoIterator<Item = (&'a PoolReference, &'a PoolTable)>,
    percent_decimals: usize,
) -> Result<Vec<DerivedRow>> {
    let shop_total = checked_total_weight(shop)?;
    let mut rows = Vec::new();
    for (pool_ref, pool) in pools {
        let cost = pool_cost(pool)?;
        rows.extend(derive_pool_rows(pool_ref, shop_total, pool, &cost, percent_decimals)?);
    }
    Ok(rows)
}

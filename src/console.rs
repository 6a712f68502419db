//! Progress output on stdout. Plain mode prints bare lines; fun mode adds color and emoji.

use std::path::Path;

use console::style;

use crate::shop::DerivedRow;

#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    fun_mode: bool,
}

impl Reporter {
    pub fn new(fun_mode: bool) -> Self {
        Self { fun_mode }
    }

    pub fn start(&self) {
        if self.fun_mode {
            let welcome = " 🎉 Welcome to the Daily Shop Data Extractor! Let's get extracting! ✨";
            println!("{}", style(welcome).magenta());
        } else {
            println!("Starting Daily Shop Data Extractor...");
        }
    }

    pub fn table_loaded(&self, table: &str) {
        if self.fun_mode {
            println!("{}", style(format!(" Successfully loaded data for table: {table}")).yellow());
        }
    }

    pub fn shop_weight(&self, total: f64) {
        if self.fun_mode {
            println!("{}", style(format!("📝 Calculated total shop weight: {total}")).cyan());
        } else {
            println!("Shop total weight: {total}");
        }
    }

    pub fn pool_header(&self, pool: &str) {
        let rule = "-".repeat(10);
        if self.fun_mode {
            println!("{}", style(format!("{rule} Extracting from pool: {pool} {rule}")).cyan());
        } else {
            println!("{rule}{pool}{rule}");
        }
    }

    pub fn pool_weight(&self, total: f64) {
        if self.fun_mode {
            println!("{}", style(format!(" Pool item weights calculated: {total}")).yellow());
        } else {
            println!("\tPool item weights: {total}");
        }
    }

    pub fn pool_cost(&self, cost: &str) {
        if self.fun_mode {
            println!("{}", style(format!(" Cost of items: {cost}")).green());
        } else {
            println!("\tCost: {cost}");
        }
    }

    pub fn item(&self, row: &DerivedRow) {
        if self.fun_mode {
            println!(
                "{}",
                style(format!(
                    " 📦 Item: {} | Mod: {} | Chance: {}",
                    row.item_name, row.mod_name, row.percentage
                ))
                .green()
            );
            println!(
                "{}",
                style(format!(
                    " 💰 Emerald Cost: {} | Gold: {}, Iron: {}, Copper: {}",
                    row.base_value, row.coins.gold, row.coins.iron, row.coins.copper
                ))
                .yellow()
            );
        } else {
            println!(
                "{},{},{},{}",
                row.item_name, row.mod_name, row.percentage, row.base_value
            );
        }
    }

    pub fn validated(&self, pools: usize, rows: usize) {
        if self.fun_mode {
            println!(
                "{}",
                style(format!(" ✅ All {pools} pool(s) look good, {rows} item(s) checked")).green()
            );
        } else {
            println!("validation passed: {pools} pool(s), {rows} item(s)");
        }
    }

    pub fn finished(&self, outputs: &[&Path]) {
        let banner = "==─==──==────== Processing Completed ==─────==──==─==";
        if self.fun_mode {
            println!("{}", style(format!(" 🎊 {banner}")).cyan().dim());
            println!("{}", style(" ✅ Data Extraction Complete! Output CSV files:").magenta());
            for path in outputs {
                println!("{}", style(format!("  📜 {}", path.display())).green());
            }
            println!("{}", style(format!(" 🎊 {banner}")).cyan().dim());
            let thanks = "  🎉 Thanks for using the Daily Shop Data Extractor! Have an amazing day!";
            println!("{}", style(thanks).blue());
        } else {
            let names: Vec<String> = outputs.iter().map(|p| p.display().to_string()).collect();
            println!("Process completed successfully. Output CSV file(s): {}", names.join(", "));
        }
    }
}

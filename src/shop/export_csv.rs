//! Sorting and delimited-text output of derived rows.
//!
//! Two layouts share the same row order: the emerald file (item, mod, cost,
//! emerald value, chance) and the coin file, which appends gold/iron/copper.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use crate::error::{ExtractError, Result};
use crate::shop::DerivedRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvLayout {
    Emerald,
    Coins,
}

impl DerivedRow {
    pub fn record(&self, layout: CsvLayout) -> Vec<String> {
        let mut record = vec![
            self.item_name.clone(),
            self.mod_name.clone(),
            self.cost.clone(),
            self.base_value.to_string(),
            self.percentage.clone(),
        ];
        if layout == CsvLayout::Coins {
            record.extend([
                self.coins.gold.to_string(),
                self.coins.iron.to_string(),
                self.coins.copper.to_string(),
            ]);
        }
        record
    }
}

/// Ascending by emerald value, then mod name, then item name. Stable.
pub fn sort_rows(rows: &mut [DerivedRow]) {
    rows.sort_by(|left, right| {
        left.base_value
            .cmp(&right.base_value)
            .then_with(|| left.mod_name.cmp(&right.mod_name))
            .then_with(|| left.item_name.cmp(&right.item_name))
    });
}

pub fn write_rows_to<W: io::Write>(
    writer: W,
    delimiter: u8,
    header: &[String],
    rows: &[DerivedRow],
    layout: CsvLayout,
) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row.record(layout))?;
    }
    writer.flush()?;
    Ok(())
}

/// Replace `path` with a fresh file holding `header` and `rows`.
pub fn write_rows(
    path: &Path,
    delimiter: u8,
    header: &[String],
    rows: &[DerivedRow],
    layout: CsvLayout,
) -> Result<()> {
    let io_err = |source: io::Error| ExtractError::Write {
        path: path.to_path_buf(),
        source,
    };

    match fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "removed previous output"),
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(io_err(err)),
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let file = fs::File::create(path).map_err(io_err)?;
    write_rows_to(file, delimiter, header, rows, layout).map_err(|source| ExtractError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), rows = rows.len(), ?layout, "wrote output");
    Ok(())
}

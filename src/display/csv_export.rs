use std::io;

use crate::display::table::{display_rows, price_cell};
use crate::display::format_change_percent;
use crate::error::StockError;
use crate::models::HistoricalData;

pub const CSV_HEADER: [&str; 7] = ["Date", "Open", "High", "Low", "Close", "Volume", "Change (%)"];

/// `{SYMBOL}_stock_data.csv`
pub fn csv_filename(symbol: &str) -> String {
    format!("{}_stock_data.csv", symbol.trim().to_uppercase())
}

/// Write the series newest first, one row per bar, formatted like the table.
pub fn write_csv<W: io::Write>(data: &HistoricalData, writer: W) -> Result<(), StockError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for row in display_rows(data) {
        let record = [
            row.date,
            price_cell(row.open),
            price_cell(row.high),
            price_cell(row.low),
            price_cell(row.close),
            format!("{:.0}", row.volume),
            format_change_percent(row.change_percent),
        ];
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(data: &HistoricalData) -> Result<String, StockError> {
    let mut buf = Vec::new();
    write_csv(data, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| StockError::IoError(io::Error::new(io::ErrorKind::InvalidData, e)))
}

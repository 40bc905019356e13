use serde::Serialize;

use crate::display::{fixed, format_change_percent, format_currency, format_volume};
use crate::models::HistoricalData;
use crate::utils::format_short_date;

/// Fixed page size of the financial data table.
pub const ROWS_PER_PAGE: usize = 5;

/// Change of bar `i` against the previous close; the oldest bar has no
/// previous bar and compares against its own open.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyChange {
    pub prev_close: f64,
    pub change_amount: f64,
    pub change_percent: f64,
    pub is_positive: bool,
}

/// `None` when `i` is outside the series.
pub fn daily_change(data: &HistoricalData, i: usize) -> Option<DailyChange> {
    let close = *data.closes.get(i)?;
    let prev_close = if i > 0 {
        *data.closes.get(i - 1)?
    } else {
        *data.opens.get(i)?
    };

    let change_amount = close - prev_close;
    let change_percent = if prev_close == 0.0 {
        0.0
    } else {
        change_amount / prev_close * 100.0
    };

    Some(DailyChange {
        prev_close,
        change_amount,
        change_percent,
        is_positive: change_amount >= 0.0,
    })
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DerivedRow {
    pub timestamp: i64,
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub change_amount: f64,
    pub change_percent: f64,
    pub is_positive: bool,
}

/// One row per bar, oldest first.
pub fn derive_rows(data: &HistoricalData) -> Vec<DerivedRow> {
    (0..data.len())
        .filter_map(|i| {
            let change = daily_change(data, i)?;
            Some(DerivedRow {
                timestamp: data.timestamps[i],
                date: format_short_date(data.timestamps[i]),
                open: *data.opens.get(i)?,
                high: *data.highs.get(i)?,
                low: *data.lows.get(i)?,
                close: *data.closes.get(i)?,
                volume: *data.volumes.get(i)?,
                change_amount: change.change_amount,
                change_percent: change.change_percent,
                is_positive: change.is_positive,
            })
        })
        .collect()
}

/// Rows newest first, the order shown in the table and the CSV export.
pub fn display_rows(data: &HistoricalData) -> Vec<DerivedRow> {
    let mut rows = derive_rows(data);
    rows.reverse();
    rows
}

/// A table row with every cell already formatted.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
    pub change: String,
    pub is_positive: bool,
}

impl From<&DerivedRow> for TableRow {
    fn from(row: &DerivedRow) -> Self {
        TableRow {
            date: row.date.clone(),
            open: format_currency(row.open),
            high: format_currency(row.high),
            low: format_currency(row.low),
            close: format_currency(row.close),
            volume: format_volume(row.volume),
            change: format_change_percent(row.change_percent),
            is_positive: row.is_positive,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TablePage {
    pub symbol: String,
    pub page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    /// 1-based position of the first and last row on this page, 0 when empty
    pub first_row: usize,
    pub last_row: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub label: String,
    pub rows: Vec<TableRow>,
}

/// Page `page` (0-based) of the newest-first table. Pages past the end
/// clamp to the last page.
pub fn paginate(data: &HistoricalData, page: usize) -> TablePage {
    let rows = display_rows(data);
    let total_rows = rows.len();
    let total_pages = (total_rows + ROWS_PER_PAGE - 1) / ROWS_PER_PAGE;

    if total_rows == 0 {
        return TablePage {
            symbol: data.symbol.clone(),
            page: 0,
            total_pages: 0,
            total_rows: 0,
            first_row: 0,
            last_row: 0,
            has_next_page: false,
            has_previous_page: false,
            label: "No data".to_string(),
            rows: Vec::new(),
        };
    }

    let page = page.min(total_pages - 1);
    let start = page * ROWS_PER_PAGE;
    let end = (start + ROWS_PER_PAGE).min(total_rows);

    TablePage {
        symbol: data.symbol.clone(),
        page,
        total_pages,
        total_rows,
        first_row: start + 1,
        last_row: end,
        has_next_page: page + 1 < total_pages,
        has_previous_page: page > 0,
        label: format!("Showing {}-{} of {} days", start + 1, end, total_rows),
        rows: rows[start..end].iter().map(TableRow::from).collect(),
    }
}

/// Two-decimal price cell without currency sign, as written to CSV.
pub(crate) fn price_cell(value: f64) -> String {
    fixed(value, 2)
}

//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types,
//! testable in isolation without database access. Timestamps are stored as
//! RFC 3339 text.

use chrono::{DateTime, Utc};
use milkbox_core::item::{Category, Item};
use rusqlite::Row;

/// Convert a SQLite row to an Item.
///
/// Expected columns: id, categoryId, text, date, startDate, endDate
pub fn row_to_item(row: &Row) -> rusqlite::Result<Item> {
    let id: i64 = row.get(0)?;
    let category_id: Option<i64> = row.get(1)?;
    let text: String = row.get(2)?;
    let date: String = row.get(3)?;
    let start_date: Option<String> = row.get(4)?;
    let end_date: Option<String> = row.get(5)?;

    Ok(Item {
        id,
        category_id,
        text,
        date: parse_datetime(&date)?,
        start_date: parse_optional_datetime(start_date)?,
        end_date: parse_optional_datetime(end_date)?,
        category_name: None,
    })
}

/// Convert a row with a joined category name to an Item.
///
/// Expected columns: id, categoryId, text, date, startDate, endDate, categoryName
pub fn row_to_item_with_category(row: &Row) -> rusqlite::Result<Item> {
    let mut item = row_to_item(row)?;
    item.category_name = row.get(6)?;
    Ok(item)
}

/// Convert a SQLite row to a Category.
///
/// Expected columns: id, name
pub fn row_to_category(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Parse a datetime from RFC 3339 text.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Parse an optional datetime column.
fn parse_optional_datetime(s: Option<String>) -> rusqlite::Result<Option<DateTime<Utc>>> {
    s.map(|s| parse_datetime(&s)).transpose()
}

/// Format a timestamp for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

//! Column conversion helpers shared by the query modules.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, Row};

/// Read a text column and parse it with `FromStr`.
///
/// Parse failures surface as `FromSqlConversionFailure` so they travel
/// through the usual `rusqlite` error path.
pub(crate) fn parse_column<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let text: String = row.get(idx)?;
    text.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("Invalid value '{text}': {e}").into(),
        )
    })
}

pub(crate) fn timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    parse_column(row, idx)
}

/// Read a nullable ISO date column.
pub(crate) fn date_column(row: &Row, idx: usize) -> rusqlite::Result<Option<Date>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| {
        t.parse::<Date>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
        })
    })
    .transpose()
}

pub(crate) fn id_column(row: &Row, idx: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(idx)? as u64)
}

pub(crate) fn minutes_column(row: &Row, idx: usize) -> rusqlite::Result<u32> {
    Ok(row.get::<_, i64>(idx)?.max(0) as u32)
}

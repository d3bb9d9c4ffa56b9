//! CSV rendering of the session list for spreadsheet and notebook use.

use pulse_core::Bankroll;
use serde::Serialize;

use crate::error::StoreError;

/// Download filename offered by the export endpoint.
pub const CSV_EXPORT_FILENAME: &str = "profitpulse_sessions.csv";

/// Column order is fixed and part of the export contract.
#[derive(Serialize)]
struct CsvRow<'a> {
    date: String,
    game: &'a str,
    stake: &'a str,
    format: &'a str,
    location: &'a str,
    buy_in: f64,
    cash_out: f64,
    profit: f64,
    hours_played: Option<f64>,
    hourly_rate: Option<f64>,
    bullets: i64,
    tag: &'a str,
    notes: &'a str,
}

/// Render all sessions as a CSV document with a header row.
pub fn sessions_to_csv(roll: &Bankroll) -> Result<String, StoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for s in &roll.sessions {
        writer.serialize(CsvRow {
            date: s.date.to_rfc3339(),
            game: &s.game,
            stake: &s.stake,
            format: &s.format,
            location: &s.location,
            buy_in: s.buy_in,
            cash_out: s.cash_out,
            profit: s.profit(),
            hours_played: s.hours_played,
            hourly_rate: s.hourly_rate(),
            bullets: s.bullets,
            tag: &s.tag,
            notes: &s.notes,
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}

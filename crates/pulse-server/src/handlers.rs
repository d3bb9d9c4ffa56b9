//! REST handlers mapping routes onto bankroll operations.
//!
//! Mutating handlers hold the bankroll lock for the whole
//! mutate-then-persist step so concurrent writes cannot interleave.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use pulse_core::bankroll::SessionPatch;
use pulse_core::{stats, ModelError, Session};
use pulse_store::export;
use serde_json::json;

use crate::error::ApiError;
use crate::params::{self, NumField};
use crate::server::AppState;

/// Flat JSON object for one session, including the derived fields.
fn session_to_json(s: &Session) -> serde_json::Value {
    json!({
        "date": s.date.to_rfc3339(),
        "game": s.game,
        "buy_in": s.buy_in,
        "cash_out": s.cash_out,
        "profit": s.profit(),
        "hours_played": s.hours_played,
        "hourly_rate": s.hourly_rate(),
        "location": s.location,
        "notes": s.notes,
        "bullets": s.bullets,
        "tag": s.tag,
        "format": s.format,
        "stake": s.stake,
    })
}

fn groups_to_object<T: serde::Serialize>(groups: Vec<(String, T)>) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (key, value) in groups {
        let _ = map.insert(key, serde_json::to_value(value).unwrap_or_default());
    }
    serde_json::Value::Object(map)
}

/// GET /api/summary
pub async fn get_summary(State(state): State<AppState>) -> Json<serde_json::Value> {
    let roll = state.bankroll.lock();
    let lines: Vec<String> = roll.summary().lines().map(str::to_string).collect();
    Json(json!({ "summary": lines }))
}

/// GET /api/history
pub async fn get_history(State(state): State<AppState>) -> Json<serde_json::Value> {
    let roll = state.bankroll.lock();
    let history = roll.bankroll_history();
    let labels: Vec<String> = (1..=history.len()).map(|i| format!("Session {i}")).collect();
    Json(json!({ "labels": labels, "data": history }))
}

/// GET /api/sessions
pub async fn list_sessions(State(state): State<AppState>) -> Json<serde_json::Value> {
    let roll = state.bankroll.lock();
    let sessions: Vec<serde_json::Value> = roll.sessions.iter().map(session_to_json).collect();
    Json(json!({ "sessions": sessions }))
}

/// POST /api/sessions
pub async fn create_session(
    State(state): State<AppState>,
    Json(data): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    let NumField::Value(buy_in) = params::float_field(&data, "buy_in") else {
        return Err(ApiError::BadRequest("Invalid buy_in/cash_out".to_string()));
    };
    let NumField::Value(cash_out) = params::float_field(&data, "cash_out") else {
        return Err(ApiError::BadRequest("Invalid buy_in/cash_out".to_string()));
    };
    let Some(game) = params::optional_str(&data, "game") else {
        return Err(ApiError::BadRequest(
            "Could not create session: game is required".to_string(),
        ));
    };

    let mut session = Session::new(game, buy_in, cash_out)
        .map_err(|e| ApiError::BadRequest(format!("Could not create session: {e}")))?;

    if let NumField::Value(hours) = params::float_field(&data, "hours_played") {
        session = session.hours(hours);
    }
    if let NumField::Value(bullets) = params::int_field(&data, "bullets") {
        session = session.bullets(bullets);
    }
    if let Some(location) = params::optional_str(&data, "location").filter(|l| !l.is_empty()) {
        session = session.location(location);
    }
    if let Some(notes) = params::optional_str(&data, "notes") {
        session = session.notes(notes);
    }
    if let Some(tag) = params::optional_str(&data, "tag") {
        session = session.tag(tag);
    }
    if let Some(format) = params::optional_str(&data, "format").filter(|f| !f.is_empty()) {
        session = session.format(format);
    }
    if let Some(stake) = params::optional_str(&data, "stake").filter(|s| !s.is_empty()) {
        session = session.stake(stake);
    }

    let created = session_to_json(&session);
    let mut roll = state.bankroll.lock();
    roll.add(session);
    state.store.save(&roll)?;

    tracing::info!(sessions = roll.sessions.len(), "session created");
    Ok((StatusCode::CREATED, Json(json!({ "ok": true, "session": created }))))
}

/// DELETE /api/sessions/{index}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut roll = state.bankroll.lock();
    let _removed = roll.remove(index).map_err(|_| ApiError::InvalidIndex)?;
    state.store.save(&roll)?;

    tracing::info!(index, "session deleted");
    Ok(Json(json!({ "ok": true })))
}

/// PUT /api/sessions/{index}
pub async fn update_session(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(data): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let patch = build_patch(&data);

    let mut roll = state.bankroll.lock();
    let updated = match roll.update(index, patch) {
        Ok(session) => session_to_json(session),
        Err(ModelError::IndexOutOfRange(_)) => return Err(ApiError::InvalidIndex),
        Err(e) => return Err(ApiError::BadRequest(e.to_string())),
    };
    state.store.save(&roll)?;

    Ok(Json(json!({ "ok": true, "session": updated })))
}

/// Translate raw update JSON into a typed patch.
///
/// Numeric fields that fail to parse are dropped from the patch, so the
/// previous value survives. An explicit empty string or null clears
/// `hours_played`; buy_in and cash_out cannot be cleared, only replaced.
fn build_patch(data: &serde_json::Value) -> SessionPatch {
    let mut patch = SessionPatch::default();

    if let Some(game) = params::optional_str(data, "game") {
        patch.game = Some(game.to_string());
    }
    if let Some(value) = data.get("location") {
        patch.location = Some(match value.as_str() {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => "Unknown".to_string(),
        });
    }
    if let Some(value) = data.get("notes") {
        patch.notes = Some(value.as_str().unwrap_or_default().to_string());
    }
    if let Some(format) = params::optional_str(data, "format") {
        patch.format = Some(format.to_string());
    }
    if let Some(stake) = params::optional_str(data, "stake") {
        patch.stake = Some(stake.to_string());
    }
    if let Some(tag) = params::optional_str(data, "tag") {
        patch.tag = Some(tag.to_string());
    }
    if let NumField::Value(bullets) = params::int_field(data, "bullets") {
        patch.bullets = Some(bullets);
    }
    if let NumField::Value(buy_in) = params::float_field(data, "buy_in") {
        patch.buy_in = Some(buy_in);
    }
    if let NumField::Value(cash_out) = params::float_field(data, "cash_out") {
        patch.cash_out = Some(cash_out);
    }
    match params::float_field(data, "hours_played") {
        NumField::Value(hours) => patch.hours_played = Some(Some(hours)),
        NumField::Empty => patch.hours_played = Some(None),
        NumField::Absent | NumField::Unparseable => {}
    }

    patch
}

/// GET /api/stats/advanced
pub async fn stats_advanced(State(state): State<AppState>) -> Json<serde_json::Value> {
    let roll = state.bankroll.lock();
    let stats = stats::advanced_stats(&roll);

    Json(json!({
        "total_sessions": stats.total_sessions,
        "total_profit": stats.total_profit,
        "total_hours": stats.total_hours,
        "hourly": stats.hourly,
        "by_location": groups_to_object(stats.by_location),
        "by_game": groups_to_object(stats.by_game),
        "variance": stats.variance,
        "stdev": stats.stdev,
        "total_bullets": stats.total_bullets,
    }))
}

/// GET /api/stats/tags
pub async fn stats_tags(State(state): State<AppState>) -> Json<serde_json::Value> {
    let roll = state.bankroll.lock();
    Json(json!({ "tags": groups_to_object(stats::tag_stats(&roll)) }))
}

/// GET /api/stats/session_length
pub async fn stats_session_length(State(state): State<AppState>) -> Json<serde_json::Value> {
    let roll = state.bankroll.lock();
    Json(json!({ "buckets": groups_to_object(stats::session_length_stats(&roll)) }))
}

/// GET /api/export/csv
pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let roll = state.bankroll.lock();
    let csv = export::sessions_to_csv(&roll)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", export::CSV_EXPORT_FILENAME),
            ),
        ],
        csv,
    ))
}

/// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

//! JSON file persistence for the bankroll.
//!
//! The whole session list is rewritten on every save. The starting amount is
//! deliberately not persisted; a reloaded bankroll always starts at 0.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use pulse_core::{Bankroll, Session};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StoreError;

/// On-disk shape of one session. Nullable fields stay nullable here so the
/// document format is stable even as the in-memory model grows defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct SessionRecord {
    game: Option<String>,
    buy_in: f64,
    cash_out: f64,
    location: Option<String>,
    hours_played: Option<f64>,
    notes: Option<String>,
    date: Option<DateTime<Utc>>,
    bullets: Option<i64>,
    tag: Option<String>,
    format: Option<String>,
    stake: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct SessionsDoc {
    #[serde(default)]
    sessions: Vec<SessionRecord>,
}

impl From<&Session> for SessionRecord {
    fn from(s: &Session) -> Self {
        Self {
            game: Some(s.game.clone()),
            buy_in: s.buy_in,
            cash_out: s.cash_out,
            location: Some(s.location.clone()),
            hours_played: s.hours_played,
            notes: Some(s.notes.clone()),
            date: Some(s.date),
            bullets: Some(s.bullets),
            tag: Some(s.tag.clone()),
            format: Some(s.format.clone()),
            stake: Some(s.stake.clone()),
        }
    }
}

impl SessionRecord {
    fn into_session(self) -> Result<Session, StoreError> {
        let mut session = Session::new(
            self.game.unwrap_or_default(),
            self.buy_in,
            self.cash_out,
        )
        .map_err(|e| StoreError::Invalid(e.to_string()))?;

        if let Some(location) = self.location.filter(|l| !l.is_empty()) {
            session = session.location(location);
        }
        if let Some(hours) = self.hours_played {
            session = session.hours(hours);
        }
        if let Some(notes) = self.notes {
            session = session.notes(notes);
        }
        if let Some(date) = self.date {
            session = session.date(date);
        }
        if let Some(bullets) = self.bullets {
            session = session.bullets(bullets);
        }
        if let Some(tag) = self.tag {
            session = session.tag(tag);
        }
        if let Some(format) = self.format {
            session = session.format(format);
        }
        if let Some(stake) = self.stake {
            session = session.stake(stake);
        }

        Ok(session)
    }
}

/// Persistence adapter for a single `sessions.json` document.
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full session list, creating parent directories as needed.
    /// Overwrites the previous document wholesale.
    pub fn save(&self, roll: &Bankroll) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let doc = SessionsDoc {
            sessions: roll.sessions.iter().map(SessionRecord::from).collect(),
        };
        let json = serde_json::to_string_pretty(&doc)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load the previously saved bankroll, or `None` when no file exists so
    /// the caller can decide to seed demo data.
    pub fn load(&self) -> Result<Option<Bankroll>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let doc: SessionsDoc = serde_json::from_str(&contents)?;

        let mut roll = Bankroll::new(0.0).expect("zero is a valid starting amount");
        for record in doc.sessions {
            roll.add(record.into_session()?);
        }

        info!(path = %self.path.display(), sessions = roll.sessions.len(), "bankroll loaded");
        Ok(Some(roll))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("data").join("sessions.json"))
    }

    fn sample_roll() -> Bankroll {
        let mut roll = Bankroll::new(500.0).unwrap();
        roll.add(
            Session::new("0.10/0.20 NLH", 20.0, 42.0)
                .unwrap()
                .location("Online")
                .hours(2.5)
                .bullets(2)
                .tag("A-game")
                .notes("Ran hot")
                .date(Utc.with_ymd_and_hms(2025, 3, 1, 18, 30, 0).unwrap()),
        );
        roll.add(Session::new("Omaha", 50.0, 10.0).unwrap());
        roll
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&sample_roll()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn round_trip_preserves_sessions_field_for_field() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let roll = sample_roll();
        store.save(&roll).unwrap();

        let loaded = store.load().unwrap().expect("file exists");
        assert_eq!(loaded.sessions, roll.sessions);
    }

    #[test]
    fn starting_amount_resets_to_zero_on_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let roll = sample_roll();
        assert_eq!(roll.starting_amount(), 500.0);
        store.save(&roll).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.starting_amount(), 0.0);
    }

    #[test]
    fn dates_round_trip_through_iso_8601() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let roll = sample_roll();
        store.save(&roll).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(doc["sessions"][0]["date"]
            .as_str()
            .unwrap()
            .starts_with("2025-03-01T18:30:00"));

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.sessions[0].date, roll.sessions[0].date);
    }

    #[test]
    fn save_overwrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&sample_roll()).unwrap();

        let mut smaller = Bankroll::new(0.0).unwrap();
        smaller.add(Session::new("PLO", 20.0, 5.0).unwrap());
        store.save(&smaller).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.sessions.len(), 1);
        assert_eq!(loaded.sessions[0].game, "PLO");
    }

    #[test]
    fn load_tolerates_sparse_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        if let Some(parent) = store.path().parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(
            store.path(),
            r#"{"sessions": [{"game": "0.10/0.20 NLH", "buy_in": 20.0, "cash_out": 42.0,
                "location": null, "hours_played": null, "notes": null, "date": null,
                "bullets": null, "tag": null, "format": null, "stake": null}]}"#,
        )
        .unwrap();

        let loaded = store.load().unwrap().unwrap();
        let s = &loaded.sessions[0];
        assert_eq!(s.location, "Unknown");
        assert_eq!(s.notes, "");
        assert_eq!(s.bullets, 1);
        assert_eq!(s.tag, "");
        assert_eq!(s.format, "cash");
        assert_eq!(s.stake, "0.10/0.20"); // inferred from game
    }
}

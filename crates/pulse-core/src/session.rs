use chrono::{DateTime, Utc};

use crate::error::ModelError;

/// One recorded poker session.
///
/// Profit and hourly rate are always derived from the stored fields, never
/// stored themselves, so the two can't drift apart.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub game: String,
    pub stake: String,
    pub format: String,
    pub location: String,
    pub buy_in: f64,
    pub cash_out: f64,
    pub hours_played: Option<f64>,
    pub bullets: i64,
    pub tag: String,
    pub notes: String,
    pub date: DateTime<Utc>,
}

impl Session {
    /// Create a session with the required fields and defaults for the rest.
    ///
    /// Stake is inferred from the game string here; an explicit stake set via
    /// [`Session::stake`] afterwards overrides the inference. Fails when
    /// buy-in or cash-out is negative or not finite.
    pub fn new(
        game: impl Into<String>,
        buy_in: f64,
        cash_out: f64,
    ) -> Result<Self, ModelError> {
        if !buy_in.is_finite() || buy_in < 0.0 {
            return Err(ModelError::InvalidAmount { field: "buy_in" });
        }
        if !cash_out.is_finite() || cash_out < 0.0 {
            return Err(ModelError::InvalidAmount { field: "cash_out" });
        }

        let game = game.into();
        let stake = infer_stake_from_game(&game);

        Ok(Self {
            game,
            stake,
            format: "cash".to_string(),
            location: "Unknown".to_string(),
            buy_in,
            cash_out,
            hours_played: None,
            bullets: 1,
            tag: String::new(),
            notes: String::new(),
            date: Utc::now(),
        })
    }

    pub fn stake(mut self, stake: impl Into<String>) -> Self {
        self.stake = stake.into();
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn hours(mut self, hours_played: f64) -> Self {
        self.hours_played = Some(hours_played);
        self
    }

    pub fn bullets(mut self, bullets: i64) -> Self {
        self.bullets = bullets;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Net profit for the session. May be negative.
    pub fn profit(&self) -> f64 {
        self.cash_out - self.buy_in
    }

    /// Profit per hour, if hours played is known and positive.
    pub fn hourly_rate(&self) -> Option<f64> {
        match self.hours_played {
            Some(h) if h > 0.0 => Some(self.profit() / h),
            _ => None,
        }
    }
}

/// Guess the stake from the game string.
/// e.g. "0.10/0.20 NLH" -> "0.10/0.20"
fn infer_stake_from_game(game: &str) -> String {
    match game.split_whitespace().next() {
        Some(first) if first.contains('/') => first.to_string(),
        _ => "unknown".to_string(),
    }
}

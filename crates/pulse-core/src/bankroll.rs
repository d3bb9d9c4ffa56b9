use crate::error::ModelError;
use crate::session::Session;

/// Partial update for a session. `None` leaves the field untouched.
///
/// `hours_played` is doubly optional: the outer `None` leaves it alone, an
/// inner `None` clears it. Callers that parse raw input are expected to drop
/// unparseable numeric values from the patch rather than clearing them.
#[derive(Clone, Debug, Default)]
pub struct SessionPatch {
    pub game: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub format: Option<String>,
    pub stake: Option<String>,
    pub tag: Option<String>,
    pub bullets: Option<i64>,
    pub buy_in: Option<f64>,
    pub cash_out: Option<f64>,
    pub hours_played: Option<Option<f64>>,
}

/// The aggregate: a starting amount plus all recorded sessions.
///
/// Insertion order of the session list is the canonical history ordering;
/// nothing here sorts by date.
#[derive(Clone, Debug)]
pub struct Bankroll {
    starting_amount: f64,
    pub sessions: Vec<Session>,
}

impl Bankroll {
    pub fn new(starting_amount: f64) -> Result<Self, ModelError> {
        if !starting_amount.is_finite() || starting_amount < 0.0 {
            return Err(ModelError::NegativeStartingAmount);
        }
        Ok(Self {
            starting_amount,
            sessions: Vec::new(),
        })
    }

    pub fn starting_amount(&self) -> f64 {
        self.starting_amount
    }

    /// Append a session to the history.
    pub fn add(&mut self, session: Session) {
        self.sessions.push(session);
    }

    /// Remove the session at `index`, returning it.
    pub fn remove(&mut self, index: usize) -> Result<Session, ModelError> {
        if index >= self.sessions.len() {
            return Err(ModelError::IndexOutOfRange(index));
        }
        Ok(self.sessions.remove(index))
    }

    /// Apply a partial update to the session at `index`.
    ///
    /// Amount updates that would break the non-negative/finite invariant are
    /// silently dropped, keeping the previous value.
    pub fn update(&mut self, index: usize, patch: SessionPatch) -> Result<&Session, ModelError> {
        let session = self
            .sessions
            .get_mut(index)
            .ok_or(ModelError::IndexOutOfRange(index))?;

        if let Some(game) = patch.game {
            session.game = game;
        }
        if let Some(location) = patch.location {
            session.location = location;
        }
        if let Some(notes) = patch.notes {
            session.notes = notes;
        }
        if let Some(format) = patch.format {
            session.format = format;
        }
        if let Some(stake) = patch.stake {
            session.stake = stake;
        }
        if let Some(tag) = patch.tag {
            session.tag = tag;
        }
        if let Some(bullets) = patch.bullets {
            session.bullets = bullets;
        }
        if let Some(buy_in) = patch.buy_in {
            if buy_in.is_finite() && buy_in >= 0.0 {
                session.buy_in = buy_in;
            }
        }
        if let Some(cash_out) = patch.cash_out {
            if cash_out.is_finite() && cash_out >= 0.0 {
                session.cash_out = cash_out;
            }
        }
        if let Some(hours) = patch.hours_played {
            session.hours_played = hours;
        }

        Ok(&self.sessions[index])
    }

    /// Sum of profits across all sessions.
    pub fn total_profit(&self) -> f64 {
        self.sessions.iter().map(Session::profit).sum()
    }

    /// Starting amount plus total profit.
    pub fn current_bankroll(&self) -> f64 {
        self.starting_amount + self.total_profit()
    }

    /// Sum of recorded hours, counting only positive values.
    pub fn total_hours(&self) -> f64 {
        self.sessions
            .iter()
            .filter_map(|s| s.hours_played)
            .filter(|h| *h > 0.0)
            .sum()
    }

    /// Overall hourly winrate: total profit over total recorded hours.
    pub fn hourly_rate(&self) -> Option<f64> {
        let hours = self.total_hours();
        if hours <= 0.0 {
            return None;
        }
        Some(self.total_profit() / hours)
    }

    /// Percentage of winning sessions, or `None` with no sessions.
    pub fn winrate(&self) -> Option<f64> {
        if self.sessions.is_empty() {
            return None;
        }
        let wins = self.sessions.iter().filter(|s| s.profit() > 0.0).count();
        Some(wins as f64 / self.sessions.len() as f64 * 100.0)
    }

    /// Session with the highest profit. Ties go to the first encountered.
    pub fn biggest_win(&self) -> Option<&Session> {
        self.sessions
            .iter()
            .max_by(|a, b| a.profit().total_cmp(&b.profit()))
    }

    /// Session with the lowest profit. Ties go to the first encountered.
    pub fn biggest_loss(&self) -> Option<&Session> {
        self.sessions
            .iter()
            .min_by(|a, b| a.profit().total_cmp(&b.profit()))
    }

    /// Bankroll value after each session, in history order.
    pub fn bankroll_history(&self) -> Vec<f64> {
        let mut current = self.starting_amount;
        self.sessions
            .iter()
            .map(|s| {
                current += s.profit();
                current
            })
            .collect()
    }

    /// Multi-line text summary. Lines whose metric is undefined are omitted.
    pub fn summary(&self) -> String {
        let num = self.sessions.len();
        let total = self.total_profit();
        let current = self.current_bankroll();
        let hours = self.total_hours();

        let mut lines = vec![
            format!("Sessions: {num}"),
            format!("Total profit: {total:+.2}"),
            format!("Current bankroll: {current:.2}"),
        ];

        if hours > 0.0 {
            lines.push(format!("Total hours (recorded): {hours:.2}"));
        }
        if let Some(hr) = self.hourly_rate() {
            lines.push(format!("Overall hourly rate: {hr:+.2} per hour"));
        }
        if let Some(wr) = self.winrate() {
            lines.push(format!("Winrate: {wr:.1}% of sessions winning"));
        }

        lines.join("\n")
    }
}

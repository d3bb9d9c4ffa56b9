//! Canned example data used when no session file exists yet.

use chrono::{Duration, TimeZone, Utc};

use crate::bankroll::Bankroll;
use crate::session::Session;

/// Build a bankroll with twenty example sessions starting 2025-01-01,
/// one per day. Stakes are left to inference from the game string.
pub fn seed_example_data() -> Bankroll {
    #[allow(clippy::type_complexity)]
    let mock: [(&str, f64, f64, &str, f64, i64, &str, &str, &str); 20] = [
        ("0.10/0.20 NLH", 20.0, 42.0, "Online", 2.5, 1, "cash", "A-game", "Ran hot vs calling station"),
        ("0.10/0.20 NLH", 20.0, 8.0, "Online", 1.8, 2, "cash", "spewy", "Spewed in 3-bet pot"),
        ("0.10/0.20 NLH", 20.0, 24.0, "IRL", 2.0, 1, "cash", "standard", "Home game, small win"),
        ("0.10/0.20 NLH", 20.0, 65.0, "Online", 3.1, 1, "cash", "locked-in", "Hit a set multiway"),
        ("0.10/0.20 NLH", 20.0, 0.0, "IRL", 1.2, 2, "cash", "tilt", "Coolered set over set"),
        ("0.10/0.20 NLH", 20.0, 30.0, "Online", 1.5, 1, "cash", "solid", "Solid session, few big pots"),
        ("0.10/0.20 NLH", 20.0, 18.0, "Online", 1.0, 1, "cash", "card-dead", "Card dead but stayed even"),
        ("0.10/0.20 NLH", 20.0, 55.0, "IRL", 3.0, 1, "cash", "good-table", "Good table, lots of limpers"),
        ("0.10/0.20 NLH", 20.0, 10.0, "Online", 1.4, 1, "cash", "spewy", "Bluffed off in bad spot"),
        ("0.10/0.20 NLH", 20.0, 40.0, "Online", 2.2, 1, "cash", "solid", "Played tight, got paid"),
        ("0.25/0.50 NLH", 50.0, 120.0, "IRL", 3.5, 1, "cash", "A-game", "Deep stack, big bluff got through"),
        ("0.25/0.50 NLH", 50.0, 30.0, "IRL", 2.0, 2, "cash", "swingy", "Lost a flip, clawed back a bit"),
        ("0.25/0.50 NLH", 50.0, 95.0, "Online", 2.8, 1, "cash", "good-table", "Table full of recreationals"),
        ("0.25/0.50 NLH", 50.0, 10.0, "Online", 1.9, 1, "cash", "hero-call", "Bad hero call river"),
        ("0.25/0.50 NLH", 50.0, 140.0, "IRL", 4.0, 1, "cash", "crushed", "Crushed home game"),
        ("0.10/0.20 PLO", 20.0, 50.0, "Online", 1.7, 1, "cash", "high-var", "Wild game, lots of variance"),
        ("0.10/0.20 PLO", 20.0, 5.0, "Online", 1.3, 2, "cash", "punished", "Tried PLO, got punished"),
        ("0.10/0.20 NLH", 20.0, 60.0, "Online", 2.6, 1, "cash", "focused", "Good focus, few mistakes"),
        ("0.10/0.20 NLH", 20.0, 16.0, "IRL", 1.5, 1, "cash", "short", "Short session before class"),
        ("0.10/0.20 NLH", 20.0, 70.0, "Online", 3.2, 1, "cash", "crushed", "Crushed regs, ran well"),
    ];

    let base_date = Utc
        .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .expect("valid base date");

    let mut roll = Bankroll::new(0.0).expect("zero is a valid starting amount");
    for (i, (game, buy_in, cash_out, location, hours, bullets, format, tag, notes)) in
        mock.into_iter().enumerate()
    {
        let session = Session::new(game, buy_in, cash_out)
            .expect("demo amounts are valid")
            .location(location)
            .hours(hours)
            .bullets(bullets)
            .format(format)
            .tag(tag)
            .notes(notes)
            .date(base_date + Duration::days(i as i64));
        roll.add(session);
    }

    roll
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_twenty_sessions() {
        let roll = seed_example_data();
        assert_eq!(roll.sessions.len(), 20);
        assert_eq!(roll.starting_amount(), 0.0);
    }

    #[test]
    fn seed_stakes_are_inferred() {
        let roll = seed_example_data();
        assert_eq!(roll.sessions[0].stake, "0.10/0.20");
        assert_eq!(roll.sessions[10].stake, "0.25/0.50");
    }

    #[test]
    fn seed_dates_advance_daily() {
        let roll = seed_example_data();
        let d0 = roll.sessions[0].date;
        let d1 = roll.sessions[1].date;
        assert_eq!((d1 - d0).num_days(), 1);
    }
}

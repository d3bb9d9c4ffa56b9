//! Plain-text report and graph rendering for the CLI subcommands.

use pulse_core::{Bankroll, Session};

const GRAPH_WIDTH: usize = 40;

/// Full text report: summary block, one line per session, biggest swings.
pub fn detailed_report(roll: &Bankroll) -> String {
    let mut out = String::new();
    out.push_str("=== Poker Bankroll Report ===\n");
    out.push_str(&roll.summary());
    out.push_str("\n\nSessions:\n");

    for (idx, s) in roll.sessions.iter().enumerate() {
        out.push_str(&session_line(idx + 1, s));
        out.push('\n');
    }

    if let Some(win) = roll.biggest_win() {
        out.push('\n');
        out.push_str(&format!(
            "Biggest win: {:+.2} in {} at {} on {}\n",
            win.profit(),
            win.game,
            win.location,
            win.date.format("%Y-%m-%d")
        ));
    }
    if let Some(loss) = roll.biggest_loss() {
        out.push_str(&format!(
            "Biggest loss: {:+.2} in {} at {} on {}\n",
            loss.profit(),
            loss.game,
            loss.location,
            loss.date.format("%Y-%m-%d")
        ));
    }

    out
}

fn session_line(idx: usize, s: &Session) -> String {
    let hours_str = match s.hours_played {
        Some(h) if h > 0.0 => format!("{h:.2}h"),
        _ => "n/a".to_string(),
    };
    let hourly_str = match s.hourly_rate() {
        Some(hr) => format!("{hr:+.2}/h"),
        None => "n/a".to_string(),
    };

    format!(
        "{idx:2}) {} | {:<18} | Buy-in: {:6.2} | Cash-out: {:6.2} | Profit: {:+6.2} | Hours: {hours_str:<7} | Hourly: {hourly_str:<9} | {} | {}",
        s.date.format("%Y-%m-%d"),
        s.game,
        s.buy_in,
        s.cash_out,
        s.profit(),
        s.location,
        s.notes,
    )
}

/// ASCII graph of the bankroll after each session, bars scaled to the
/// min..max range of the history.
pub fn bankroll_graph(roll: &Bankroll) -> String {
    let history = roll.bankroll_history();
    if history.is_empty() {
        return "No sessions yet, nothing to graph.".to_string();
    }

    let max = history.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = history.iter().copied().fold(f64::INFINITY, f64::min);
    let span = if max == min { 1.0 } else { max - min };

    let mut out = String::new();
    out.push_str("=== Bankroll Over Time (ASCII graph) ===\n");
    for (idx, value) in history.iter().enumerate() {
        let normalized = (value - min) / span;
        let bar_len = (normalized * GRAPH_WIDTH as f64) as usize;
        out.push_str(&format!(
            "Session {:2}: {value:8.2} | {}\n",
            idx + 1,
            "#".repeat(bar_len)
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_roll() -> Bankroll {
        let mut roll = Bankroll::new(0.0).unwrap();
        roll.add(
            Session::new("0.10/0.20 NLH", 20.0, 42.0)
                .unwrap()
                .hours(2.5)
                .location("Online")
                .notes("Ran hot"),
        );
        roll.add(Session::new("0.25/0.50 PLO", 50.0, 10.0).unwrap());
        roll
    }

    #[test]
    fn report_lists_sessions_and_swings() {
        let report = detailed_report(&sample_roll());
        assert!(report.contains("=== Poker Bankroll Report ==="));
        assert!(report.contains(" 1) "));
        assert!(report.contains("0.10/0.20 NLH"));
        assert!(report.contains("Profit: +22.00"));
        assert!(report.contains("Biggest win: +22.00 in 0.10/0.20 NLH at Online"));
        assert!(report.contains("Biggest loss: -40.00 in 0.25/0.50 PLO at Unknown"));
    }

    #[test]
    fn report_marks_unknown_hours() {
        let report = detailed_report(&sample_roll());
        assert!(report.contains("Hours: 2.50h"));
        assert!(report.contains("Hours: n/a"));
    }

    #[test]
    fn graph_scales_bars_between_min_and_max() {
        let graph = bankroll_graph(&sample_roll());
        let lines: Vec<&str> = graph.lines().collect();
        // history is [22, -18]: max gets the full bar, min gets none
        assert!(lines[1].ends_with(&"#".repeat(40)));
        assert!(lines[2].ends_with("| "));
        assert!(lines[1].contains("22.00"));
        assert!(lines[2].contains("-18.00"));
    }

    #[test]
    fn graph_with_flat_history_does_not_divide_by_zero() {
        let mut roll = Bankroll::new(0.0).unwrap();
        roll.add(Session::new("NLH", 20.0, 20.0).unwrap());
        let graph = bankroll_graph(&roll);
        assert!(graph.contains("Session  1:"));
    }

    #[test]
    fn graph_of_empty_roll() {
        let roll = Bankroll::new(0.0).unwrap();
        assert_eq!(bankroll_graph(&roll), "No sessions yet, nothing to graph.");
    }
}

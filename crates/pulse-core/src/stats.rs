//! Grouped aggregates over the session list.
//!
//! Everything here is a one-shot reduction over the current sessions,
//! recomputed on every call. No caching.

use serde::Serialize;

use crate::bankroll::Bankroll;

/// Per-group breakdown used for location and game groupings.
#[derive(Clone, Debug, Serialize)]
pub struct GroupStats {
    pub sessions: usize,
    pub total_profit: f64,
    pub total_hours: f64,
    pub hourly: Option<f64>,
}

/// Backend-computed aggregates for the stats page.
#[derive(Clone, Debug, Serialize)]
pub struct AdvancedStats {
    pub total_sessions: usize,
    pub total_profit: f64,
    pub total_hours: f64,
    pub hourly: Option<f64>,
    pub variance: Option<f64>,
    pub stdev: Option<f64>,
    pub total_bullets: i64,
    #[serde(skip)]
    pub by_location: Vec<(String, GroupStats)>,
    #[serde(skip)]
    pub by_game: Vec<(String, GroupStats)>,
}

/// Mean hourly rate for sessions sharing a tag.
#[derive(Clone, Debug, Serialize)]
pub struct TagStats {
    pub count: usize,
    pub mean_hourly: f64,
}

/// Profit stats for one session-length bucket.
#[derive(Clone, Debug, Serialize)]
pub struct BucketStats {
    pub count: usize,
    pub mean_profit: f64,
    pub total_profit: f64,
}

/// Fixed duration buckets, half-open: [0,2) [2,3) [3,4) [4,inf).
const BUCKET_LABELS: [&str; 4] = ["0–2h", "2–3h", "3–4h", "4h+"];

fn bucket_index(hours: f64) -> Option<usize> {
    if !hours.is_finite() || hours < 0.0 {
        return None;
    }
    Some(match hours {
        h if h < 2.0 => 0,
        h if h < 3.0 => 1,
        h if h < 4.0 => 2,
        _ => 3,
    })
}

/// Totals, profit variance/stdev, per-location and per-game breakdowns.
///
/// Group order is first-encountered in history order. Variance is the sample
/// variance (n-1 denominator), undefined with fewer than two sessions.
pub fn advanced_stats(roll: &Bankroll) -> AdvancedStats {
    let sessions = &roll.sessions;
    let total_sessions = sessions.len();
    let total_profit: f64 = sessions.iter().map(|s| s.profit()).sum();
    let total_hours: f64 = sessions.iter().map(|s| s.hours_played.unwrap_or(0.0)).sum();
    let hourly = (total_hours > 0.0).then(|| total_profit / total_hours);

    let mut by_location: Vec<(String, GroupStats)> = Vec::new();
    let mut by_game: Vec<(String, GroupStats)> = Vec::new();
    for s in sessions {
        accumulate(&mut by_location, &s.location, s.profit(), s.hours_played);
        accumulate(&mut by_game, &s.game, s.profit(), s.hours_played);
    }
    finish_groups(&mut by_location);
    finish_groups(&mut by_game);

    let (variance, stdev) = if total_sessions > 1 {
        let mean = total_profit / total_sessions as f64;
        let var = sessions
            .iter()
            .map(|s| (s.profit() - mean).powi(2))
            .sum::<f64>()
            / (total_sessions - 1) as f64;
        (Some(var), Some(var.sqrt()))
    } else {
        (None, None)
    };

    let total_bullets: i64 = sessions.iter().map(|s| s.bullets).sum();

    AdvancedStats {
        total_sessions,
        total_profit,
        total_hours,
        hourly,
        variance,
        stdev,
        total_bullets,
        by_location,
        by_game,
    }
}

fn accumulate(groups: &mut Vec<(String, GroupStats)>, key: &str, profit: f64, hours: Option<f64>) {
    let idx = match groups.iter().position(|(k, _)| k == key) {
        Some(i) => i,
        None => {
            groups.push((
                key.to_string(),
                GroupStats {
                    sessions: 0,
                    total_profit: 0.0,
                    total_hours: 0.0,
                    hourly: None,
                },
            ));
            groups.len() - 1
        }
    };
    let entry = &mut groups[idx].1;
    entry.sessions += 1;
    entry.total_profit += profit;
    entry.total_hours += hours.unwrap_or(0.0);
}

fn finish_groups(groups: &mut [(String, GroupStats)]) {
    for (_, stats) in groups {
        stats.hourly = (stats.total_hours > 0.0).then(|| stats.total_profit / stats.total_hours);
    }
}

/// Mean hourly rate grouped by tag, sorted descending by mean.
///
/// Untagged sessions and sessions without a defined hourly rate are skipped.
pub fn tag_stats(roll: &Bankroll) -> Vec<(String, TagStats)> {
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    for s in &roll.sessions {
        if s.tag.is_empty() {
            continue;
        }
        let Some(rate) = s.hourly_rate() else {
            continue;
        };
        match groups.iter_mut().find(|(tag, _)| *tag == s.tag) {
            Some((_, rates)) => rates.push(rate),
            None => groups.push((s.tag.clone(), vec![rate])),
        }
    }

    let mut out: Vec<(String, TagStats)> = groups
        .into_iter()
        .map(|(tag, rates)| {
            let mean = rates.iter().sum::<f64>() / rates.len() as f64;
            (
                tag,
                TagStats {
                    count: rates.len(),
                    mean_hourly: mean,
                },
            )
        })
        .collect();
    out.sort_by(|a, b| b.1.mean_hourly.total_cmp(&a.1.mean_hourly));
    out
}

/// Profit stats grouped by session-length bucket, in bucket order.
///
/// Sessions with unknown hours are excluded; empty buckets are omitted.
pub fn session_length_stats(roll: &Bankroll) -> Vec<(String, BucketStats)> {
    let mut counts = [0usize; 4];
    let mut totals = [0.0f64; 4];
    for s in &roll.sessions {
        let Some(idx) = s.hours_played.and_then(bucket_index) else {
            continue;
        };
        counts[idx] += 1;
        totals[idx] += s.profit();
    }

    BUCKET_LABELS
        .iter()
        .enumerate()
        .filter(|(i, _)| counts[*i] > 0)
        .map(|(i, label)| {
            (
                (*label).to_string(),
                BucketStats {
                    count: counts[i],
                    mean_profit: totals[i] / counts[i] as f64,
                    total_profit: totals[i],
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    fn roll_with(sessions: Vec<Session>) -> Bankroll {
        let mut roll = Bankroll::new(0.0).unwrap();
        for s in sessions {
            roll.add(s);
        }
        roll
    }

    fn s(buy_in: f64, cash_out: f64) -> Session {
        Session::new("0.10/0.20 NLH", buy_in, cash_out).unwrap()
    }

    #[test]
    fn advanced_totals_and_groups() {
        let roll = roll_with(vec![
            s(20.0, 42.0).location("Online").hours(2.0),
            s(20.0, 10.0).location("Online").hours(1.0),
            s(50.0, 120.0).location("IRL").hours(3.5),
        ]);

        let stats = advanced_stats(&roll);
        assert_eq!(stats.total_sessions, 3);
        assert!((stats.total_profit - 82.0).abs() < 1e-9);
        assert!((stats.total_hours - 6.5).abs() < 1e-9);
        assert!(stats.hourly.is_some());

        assert_eq!(stats.by_location.len(), 2);
        assert_eq!(stats.by_location[0].0, "Online");
        assert_eq!(stats.by_location[0].1.sessions, 2);
        assert!((stats.by_location[0].1.total_profit - 12.0).abs() < 1e-9);
        assert_eq!(stats.by_location[1].0, "IRL");
        assert!((stats.by_location[1].1.hourly.unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn group_hourly_undefined_without_hours() {
        let roll = roll_with(vec![s(20.0, 42.0).location("Online")]);
        let stats = advanced_stats(&roll);
        assert_eq!(stats.by_location[0].1.hourly, None);
    }

    #[test]
    fn variance_needs_two_sessions() {
        let one = roll_with(vec![s(20.0, 42.0)]);
        let stats = advanced_stats(&one);
        assert_eq!(stats.variance, None);
        assert_eq!(stats.stdev, None);

        // profits 22 and -12, mean 5, sample variance (17^2 + 17^2) / 1 = 578
        let two = roll_with(vec![s(20.0, 42.0), s(20.0, 8.0)]);
        let stats = advanced_stats(&two);
        assert!((stats.variance.unwrap() - 578.0).abs() < 1e-9);
        assert!((stats.stdev.unwrap() - 578.0f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn total_bullets_sums() {
        let roll = roll_with(vec![s(20.0, 42.0).bullets(2), s(20.0, 0.0)]);
        assert_eq!(advanced_stats(&roll).total_bullets, 3);
    }

    #[test]
    fn tags_sorted_descending_by_mean_hourly() {
        let roll = roll_with(vec![
            s(20.0, 42.0).tag("A-game").hours(2.0),  // +11/h
            s(20.0, 0.0).tag("tilt").hours(1.0),     // -20/h
            s(20.0, 30.0).tag("A-game").hours(1.0),  // +10/h
            s(20.0, 25.0).tag("standard").hours(1.0), // +5/h
        ]);

        let tags = tag_stats(&roll);
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[0].0, "A-game");
        assert_eq!(tags[0].1.count, 2);
        assert!((tags[0].1.mean_hourly - 10.5).abs() < 1e-9);
        assert_eq!(tags[1].0, "standard");
        assert_eq!(tags[2].0, "tilt");
    }

    #[test]
    fn tags_skip_sessions_without_hourly_rate() {
        let roll = roll_with(vec![s(20.0, 42.0).tag("A-game")]);
        assert!(tag_stats(&roll).is_empty());
    }

    #[test]
    fn untagged_sessions_do_not_form_a_group() {
        let roll = roll_with(vec![s(20.0, 42.0).hours(2.0)]);
        assert!(tag_stats(&roll).is_empty());
    }

    #[test]
    fn length_buckets_are_half_open() {
        let roll = roll_with(vec![
            s(20.0, 42.0).hours(1.9), // [0,2)
            s(20.0, 30.0).hours(2.0), // [2,3) — boundary lands right
            s(20.0, 10.0).hours(3.0), // [3,4)
            s(20.0, 90.0).hours(4.0), // [4,inf)
            s(20.0, 99.0).hours(12.0),
        ]);

        let buckets = session_length_stats(&roll);
        let labels: Vec<&str> = buckets.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["0–2h", "2–3h", "3–4h", "4h+"]);
        assert_eq!(buckets[3].1.count, 2);
        assert!((buckets[3].1.total_profit - 149.0).abs() < 1e-9);
        assert!((buckets[3].1.mean_profit - 74.5).abs() < 1e-9);
    }

    #[test]
    fn length_buckets_exclude_unknown_hours_and_omit_empty() {
        let roll = roll_with(vec![s(20.0, 42.0), s(20.0, 30.0).hours(2.5)]);
        let buckets = session_length_stats(&roll);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].0, "2–3h");
        assert_eq!(buckets[0].1.count, 1);
    }

    #[test]
    fn empty_roll_yields_empty_groupings() {
        let roll = Bankroll::new(0.0).unwrap();
        assert!(tag_stats(&roll).is_empty());
        assert!(session_length_stats(&roll).is_empty());
        let stats = advanced_stats(&roll);
        assert_eq!(stats.total_sessions, 0);
        assert!(stats.by_location.is_empty());
        assert_eq!(stats.hourly, None);
    }
}

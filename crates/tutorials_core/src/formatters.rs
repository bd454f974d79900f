//! Display formatting for transcript and tutorial fields.

use crate::domain::Phrase;
use chrono::{DateTime, Utc};

/// Ticks per second in transcript durations.
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Converts a tick count into `mm:ss`. Minutes are not wrapped into hours.
pub fn format_duration(ticks: i64) -> String {
    let seconds = ticks.max(0) / TICKS_PER_SECOND;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Most frequent locale across the phrases, or `"N/A"`.
///
/// Ties go to the locale that appeared first.
pub fn dominant_language(phrases: &[Phrase]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for locale in phrases
        .iter()
        .filter_map(|p| p.locale.as_deref())
        .filter(|l| !l.is_empty())
    {
        match counts.iter_mut().find(|(l, _)| *l == locale) {
            Some((_, n)) => *n += 1,
            None => counts.push((locale, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (locale, n) in counts {
        if best.map_or(true, |(_, top)| n > top) {
            best = Some((locale, n));
        }
    }
    best.map_or_else(|| "N/A".to_string(), |(l, _)| l.to_string())
}

/// Mean confidence over phrases that carry one; `0.0` when none do.
pub fn average_confidence(phrases: &[Phrase]) -> f64 {
    let scores: Vec<f64> = phrases.iter().filter_map(|p| p.confidence).collect();
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

pub fn format_confidence(score: f64) -> String {
    format!("{:.2}", score)
}

/// `Jun 14, 2025`
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%b %d, %Y").to_string()
}

/// `Jun 14, 2025, 05:58 PM`
pub fn format_date_time(at: &DateTime<Utc>) -> String {
    at.format("%b %d, %Y, %I:%M %p").to_string()
}

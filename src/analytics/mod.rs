//! Mood statistics over a user's journal entries.
//!
//! Everything here is a pure function of its inputs: the entry metadata, the
//! community post count and an explicit `now`. Nothing reads the wall clock,
//! so callers and tests control "today".
//!
//! # Flow
//!
//! 1. Parse each record's mood and calendar day, setting aside malformed ones
//! 2. Average the mood values (0 when there are none)
//! 3. Walk back from today through the distinct days to find the streak

use crate::journal_core::{parse_date_only, Mood, ReferenceFrame};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// Clear metadata of one entry, as handed over by the record store.
///
/// Fields are kept as raw strings so a damaged record can be skipped and
/// counted instead of failing the whole computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodRecord {
    pub mood: String,
    pub date_only: String,
}

impl MoodRecord {
    pub fn new(mood: impl Into<String>, date_only: impl Into<String>) -> Self {
        Self {
            mood: mood.into(),
            date_only: date_only.into(),
        }
    }
}

/// Records left out of part of the computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkippedRecords {
    /// Records whose `date_only` could not be parsed; excluded from the streak.
    pub unparseable_dates: usize,
    /// Records whose mood is not in the canonical set; excluded from the average.
    pub unknown_moods: usize,
}

/// Aggregate statistics for one user, derived fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub total_entries: usize,
    /// Mean mood value rounded half-up to one decimal place, 0 without moods.
    pub average_mood: f64,
    /// Consecutive days with an entry, ending today.
    pub streak: u32,
    pub community_posts: u64,
    pub skipped: SkippedRecords,
}

/// Mean mood value rounded half-up to one decimal place.
///
/// Uses integer arithmetic, so halves such as 1.75 always round up to 1.8.
/// An empty input yields 0.
///
/// # Examples
///
/// ```
/// use moodlog::analytics::average_mood;
/// use moodlog::journal_core::Mood;
///
/// assert_eq!(average_mood(Vec::<Mood>::new()), 0.0);
/// assert_eq!(average_mood([Mood::Happy]), 4.0);
/// assert_eq!(average_mood([Mood::Awful, Mood::Great]), 3.0);
/// ```
pub fn average_mood<I>(moods: I) -> f64
where
    I: IntoIterator<Item = Mood>,
{
    let (sum, count) = moods
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), mood| {
            (sum + u64::from(mood.value()), count + 1)
        });

    if count == 0 {
        return 0.0;
    }

    // floor(10 * sum / count + 1/2)
    let tenths = (20 * sum + count) / (2 * count);
    tenths as f64 / 10.0
}

/// Number of consecutive calendar days, ending at `today`, that have an entry.
///
/// Days repeated in the input count once. If `today` itself has no entry the
/// streak is 0. Days after `today` are ignored.
///
/// # Examples
///
/// ```
/// use moodlog::analytics::compute_streak;
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
/// assert_eq!(compute_streak([day(10), day(9), day(8), day(6)], day(10)), 3);
/// assert_eq!(compute_streak([day(9), day(8), day(7)], day(10)), 0);
/// ```
pub fn compute_streak<I>(days: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let distinct: BTreeSet<NaiveDate> = days.into_iter().collect();

    let mut streak = 0;
    let mut expected = Some(today);
    for day in distinct.range(..=today).rev() {
        if Some(*day) != expected {
            break;
        }
        streak += 1;
        expected = day.pred_opt();
    }

    streak
}

/// Builds the `StatsSummary` for one user's entry metadata.
///
/// `total_entries` counts every record, including ones skipped for a bad
/// date or mood. Today is the calendar day of `now` in `frame`.
pub fn compute_summary(
    records: &[MoodRecord],
    community_posts: u64,
    now: DateTime<Utc>,
    frame: &ReferenceFrame,
) -> StatsSummary {
    let mut skipped = SkippedRecords::default();
    let mut moods = Vec::with_capacity(records.len());
    let mut days = Vec::with_capacity(records.len());

    for record in records {
        match record.mood.parse::<Mood>() {
            Ok(mood) => moods.push(mood),
            Err(_) => skipped.unknown_moods += 1,
        }
        match parse_date_only(&record.date_only) {
            Ok(day) => days.push(day),
            Err(_) => skipped.unparseable_dates += 1,
        }
    }

    if skipped != SkippedRecords::default() {
        debug!(
            unparseable_dates = skipped.unparseable_dates,
            unknown_moods = skipped.unknown_moods,
            "Skipped malformed records while computing stats"
        );
    }

    let today = frame.date_of(now);
    StatsSummary {
        total_entries: records.len(),
        average_mood: average_mood(moods),
        streak: compute_streak(days, today),
        community_posts,
        skipped,
    }
}

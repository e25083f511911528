//! Core journal data model without I/O operations.
//!
//! This module holds the canonical mood enumeration, the reference frame used
//! to turn timestamps into calendar days, and the `JournalEntry` record as it
//! moves between the codec, the store and the analytics engine.

use crate::constants::DATE_FORMAT_ISO;
use crate::crypto::CipherText;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The canonical closed set of moods, ordered from worst to best.
///
/// Each mood maps to a value on a 1..=5 scale used for averaging. Input is
/// accepted as the label (case-insensitive) or the mood's display symbol.
///
/// Symbols outside these five are rejected rather than mapped to a nearby level.
///
/// # Examples
///
/// ```
/// use moodlog::journal_core::Mood;
///
/// let mood: Mood = "Happy".parse().unwrap();
/// assert_eq!(mood, Mood::Happy);
/// assert_eq!(mood.value(), 4);
/// assert_eq!("🙂".parse::<Mood>().unwrap(), Mood::Happy);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Awful,
    Bad,
    Okay,
    Happy,
    Great,
}

impl Mood {
    /// Every mood in scale order.
    pub const ALL: [Mood; 5] = [Mood::Awful, Mood::Bad, Mood::Okay, Mood::Happy, Mood::Great];

    /// Numeric scale value, 1 (awful) through 5 (great).
    pub fn value(self) -> u8 {
        match self {
            Mood::Awful => 1,
            Mood::Bad => 2,
            Mood::Okay => 3,
            Mood::Happy => 4,
            Mood::Great => 5,
        }
    }

    /// Lowercase label, also the persisted form.
    pub fn label(self) -> &'static str {
        match self {
            Mood::Awful => "awful",
            Mood::Bad => "bad",
            Mood::Okay => "okay",
            Mood::Happy => "happy",
            Mood::Great => "great",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Mood::Awful => "😞",
            Mood::Bad => "🙁",
            Mood::Okay => "😐",
            Mood::Happy => "🙂",
            Mood::Great => "😄",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mood {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.label().eq_ignore_ascii_case(trimmed) || mood.symbol() == trimmed)
            .ok_or_else(|| {
                AppError::Journal(format!(
                    "Unknown mood '{}'. Expected one of: awful, bad, okay, happy, great",
                    trimmed
                ))
            })
    }
}

/// The fixed timezone in which entry timestamps are turned into calendar days.
///
/// Every writer and reader must share one frame, so an entry's `date_only`
/// does not depend on where it is viewed from.
///
/// # Examples
///
/// ```
/// use moodlog::journal_core::ReferenceFrame;
/// use chrono::{TimeZone, Utc};
///
/// let frame = ReferenceFrame::parse("+09:00").unwrap();
/// let instant = Utc.with_ymd_and_hms(2024, 3, 9, 20, 0, 0).unwrap();
/// assert_eq!(frame.date_of(instant).to_string(), "2024-03-10");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceFrame {
    offset: FixedOffset,
}

impl ReferenceFrame {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    pub fn from_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Parses `±HH:MM`, `Z` or `UTC`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for anything else, or for offsets of a day or more.
    pub fn parse(value: &str) -> AppResult<Self> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
            return Ok(Self::utc());
        }

        trimmed
            .parse::<FixedOffset>()
            .map(Self::from_offset)
            .map_err(|e| {
                AppError::Config(format!(
                    "Invalid UTC offset '{}': {}. Use the form +HH:MM or -HH:MM",
                    trimmed, e
                ))
            })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar day of `instant` in this frame.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }
}

impl Default for ReferenceFrame {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Display for ReferenceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.offset)
    }
}

/// A stored journal entry. Text is only ever held as ciphertext here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    /// Opaque identifier assigned by the store.
    pub id: String,
    /// Identity of the user who wrote the entry.
    pub owner: String,
    pub cipher_text: CipherText,
    pub mood: Mood,
    /// Creation instant, set once.
    pub created_at: DateTime<Utc>,
    /// Calendar day of `created_at` in the store's reference frame.
    pub date_only: NaiveDate,
}

/// A stored entry whose mood or timestamps could not be read.
///
/// Holds the raw column values so the entry can still be listed and deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct UnreadableEntry {
    pub id: String,
    pub owner: String,
    pub cipher_text: CipherText,
    pub mood: String,
    pub created_at: String,
    pub date_only: String,
}

/// One row of an owner's journal as read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredEntry {
    Entry(JournalEntry),
    Unreadable(UnreadableEntry),
}

impl StoredEntry {
    pub fn id(&self) -> &str {
        match self {
            StoredEntry::Entry(entry) => &entry.id,
            StoredEntry::Unreadable(raw) => &raw.id,
        }
    }

    pub fn cipher_text(&self) -> &CipherText {
        match self {
            StoredEntry::Entry(entry) => &entry.cipher_text,
            StoredEntry::Unreadable(raw) => &raw.cipher_text,
        }
    }

    pub fn is_unreadable(&self) -> bool {
        matches!(self, StoredEntry::Unreadable(_))
    }
}

/// An entry that has been encrypted but not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub owner: String,
    pub cipher_text: CipherText,
    pub mood: Mood,
    pub created_at: DateTime<Utc>,
    pub date_only: NaiveDate,
}

impl NewEntry {
    /// Stamps a freshly encrypted entry with its creation time and day.
    pub fn new(
        owner: impl Into<String>,
        cipher_text: CipherText,
        mood: Mood,
        created_at: DateTime<Utc>,
        frame: &ReferenceFrame,
    ) -> Self {
        Self {
            owner: owner.into(),
            cipher_text,
            mood,
            created_at,
            date_only: frame.date_of(created_at),
        }
    }
}

/// Formats a calendar day the way it is persisted.
pub fn format_date_only(date: NaiveDate) -> String {
    date.format(DATE_FORMAT_ISO).to_string()
}

/// Parses a persisted calendar day.
pub fn parse_date_only(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT_ISO)
}

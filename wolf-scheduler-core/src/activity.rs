//! Shared activity model.
//!
//! Courses and events both carry a [`Meeting`]: a title, a set of meeting days
//! and a time span. Conflict detection only looks at the meeting, while the
//! duplicate rule and the display projections are supplied per variant through
//! [`Schedulable`].

use std::fmt;

use chrono::NaiveTime;
use serde::Serialize;
use thiserror::Error;

use crate::{
    Result,
    course::Course,
    error::{Error, Field},
    event::Event,
};

/// Symbol that marks a course with no fixed meeting time.
pub const ARRANGED_SYMBOL: char = 'A';

/// Display row with name, section, title and meeting string.
pub type ShortRow = [String; 4];

/// Display row with name, section, title, credits, instructor, meeting string
/// and details.
pub type LongRow = [String; 7];

/// Activity variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Course,
    Event,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Course => f.write_str("course"),
            Self::Event => f.write_str("event"),
        }
    }
}

/// Day of the week as used in meeting-day strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const fn symbol(self) -> char {
        match self {
            Self::Monday => 'M',
            Self::Tuesday => 'T',
            Self::Wednesday => 'W',
            Self::Thursday => 'H',
            Self::Friday => 'F',
            Self::Saturday => 'S',
            Self::Sunday => 'U',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'M' => Some(Self::Monday),
            'T' => Some(Self::Tuesday),
            'W' => Some(Self::Wednesday),
            'H' => Some(Self::Thursday),
            'F' => Some(Self::Friday),
            'S' => Some(Self::Saturday),
            'U' => Some(Self::Sunday),
            _ => None,
        }
    }

    const fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }
}

/// Meeting days of an activity.
///
/// Symbols keep the order they were given in, repeats included, so that a
/// record line written back out matches the one read in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum DaySet {
    /// No fixed meeting time. Only courses may be arranged.
    Arranged,
    Days(Vec<Day>),
}

impl DaySet {
    /// Parses a meeting-day string against the alphabet of `kind`.
    ///
    /// Courses accept `MTWHF` or the lone symbol `A`; events accept `MTWHFSU`.
    pub fn parse(symbols: &str, kind: ActivityKind) -> Result<Self> {
        let invalid = || Error::InvalidField(Field::MeetingDays);

        if symbols.is_empty() {
            return Err(invalid());
        }

        if symbols.contains(ARRANGED_SYMBOL) {
            return if kind == ActivityKind::Course && symbols.len() == 1 {
                Ok(Self::Arranged)
            } else {
                Err(invalid())
            };
        }

        symbols
            .chars()
            .map(|symbol| match Day::from_symbol(symbol) {
                Some(day) if kind == ActivityKind::Event || !day.is_weekend() => Ok(day),
                _ => Err(invalid()),
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::Days)
    }

    pub const fn is_arranged(&self) -> bool {
        matches!(self, Self::Arranged)
    }

    /// True when both sets name at least one common day.
    pub fn shares_day_with(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Days(ours), Self::Days(theirs)) => ours.iter().any(|day| theirs.contains(day)),
            _ => false,
        }
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arranged => write!(f, "{ARRANGED_SYMBOL}"),
            Self::Days(days) => days.iter().try_for_each(|day| write!(f, "{}", day.symbol())),
        }
    }
}

impl From<DaySet> for String {
    fn from(days: DaySet) -> Self {
        days.to_string()
    }
}

/// Start and end of a meeting as `HHMM` integers on a 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeSpan {
    start: u16,
    end: u16,
}

impl TimeSpan {
    /// Span used by activities without a fixed meeting time.
    pub const NONE: Self = Self { start: 0, end: 0 };

    pub fn new(start: u16, end: u16) -> Result<Self> {
        if !Self::is_clock_time(start) || !Self::is_clock_time(end) || start > end {
            return Err(Error::InvalidField(Field::MeetingTime));
        }
        Ok(Self { start, end })
    }

    const fn is_clock_time(time: u16) -> bool {
        time / 100 < 24 && time % 100 < 60
    }

    pub const fn start(&self) -> u16 {
        self.start
    }

    pub const fn end(&self) -> u16 {
        self.end
    }

    /// Closed-interval overlap: spans that touch at an endpoint overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start.max(other.start) <= self.end.min(other.end)
    }

    fn clock(time: u16) -> String {
        NaiveTime::from_hms_opt(u32::from(time / 100), u32::from(time % 100), 0)
            .map(|t| t.format("%-I:%M%p").to_string())
            .unwrap_or_default()
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", Self::clock(self.start), Self::clock(self.end))
    }
}

/// Returned by [`Meeting::check_conflict`] when two meetings overlap.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Schedule conflict.")]
pub struct ConflictError;

/// Fields every activity has.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Meeting {
    title: String,
    days: DaySet,
    time: TimeSpan,
}

impl Meeting {
    /// Validates the common fields for an activity of the given kind.
    ///
    /// An arranged day set must come with `0`/`0` times.
    pub fn new(
        kind: ActivityKind,
        title: impl Into<String>,
        days: &str,
        start: u16,
        end: u16,
    ) -> Result<Self> {
        let title = title.into();
        if title.is_empty() {
            return Err(Error::InvalidField(Field::Title));
        }

        let days = DaySet::parse(days, kind)?;
        let time = if days.is_arranged() {
            if start != 0 || end != 0 {
                return Err(Error::InvalidField(Field::MeetingTime));
            }
            TimeSpan::NONE
        } else {
            TimeSpan::new(start, end)?
        };

        Ok(Self { title, days, time })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replaces the title; an empty title leaves the meeting unchanged.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        if title.is_empty() {
            return Err(Error::InvalidField(Field::Title));
        }
        self.title = title;
        Ok(())
    }

    /// Replaces days and times together, validated against the alphabet of
    /// `kind`. On error the meeting is unchanged.
    pub fn set_days_and_time(
        &mut self,
        kind: ActivityKind,
        days: &str,
        start: u16,
        end: u16,
    ) -> Result<()> {
        let Self { days, time, .. } = Self::new(kind, self.title.clone(), days, start, end)?;
        self.days = days;
        self.time = time;
        Ok(())
    }

    pub const fn days(&self) -> &DaySet {
        &self.days
    }

    pub const fn time(&self) -> TimeSpan {
        self.time
    }

    /// Human readable summary such as `MW 1:30PM-2:45PM` or `Arranged`.
    pub fn meeting_string(&self) -> String {
        if self.days.is_arranged() {
            "Arranged".to_string()
        } else {
            format!("{} {}", self.days, self.time)
        }
    }

    /// Fails when the two meetings share a day and their spans overlap.
    ///
    /// Arranged meetings never conflict. The check is symmetric.
    pub fn check_conflict(&self, other: &Self) -> std::result::Result<(), ConflictError> {
        if self.days.shares_day_with(&other.days) && self.time.overlaps(&other.time) {
            Err(ConflictError)
        } else {
            Ok(())
        }
    }
}

/// Capabilities every activity variant provides.
pub trait Schedulable {
    fn meeting(&self) -> &Meeting;

    fn kind(&self) -> ActivityKind;

    /// Variant specific identity match; never true across variants.
    fn is_duplicate(&self, other: &Activity) -> bool;

    fn short_row(&self) -> ShortRow;

    fn long_row(&self) -> LongRow;

    /// Canonical comma separated record line.
    fn to_record(&self) -> String;

    fn title(&self) -> &str {
        self.meeting().title()
    }

    fn meeting_string(&self) -> String {
        self.meeting().meeting_string()
    }

    fn check_conflict(&self, other: &dyn Schedulable) -> std::result::Result<(), ConflictError> {
        self.meeting().check_conflict(other.meeting())
    }
}

/// Entry of a schedule: either an enrolled course or a personal event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Activity {
    Course(Course),
    Event(Event),
}

impl Activity {
    fn inner(&self) -> &dyn Schedulable {
        match self {
            Self::Course(course) => course,
            Self::Event(event) => event,
        }
    }
}

impl Schedulable for Activity {
    fn meeting(&self) -> &Meeting {
        self.inner().meeting()
    }

    fn kind(&self) -> ActivityKind {
        self.inner().kind()
    }

    fn is_duplicate(&self, other: &Activity) -> bool {
        self.inner().is_duplicate(other)
    }

    fn short_row(&self) -> ShortRow {
        self.inner().short_row()
    }

    fn long_row(&self) -> LongRow {
        self.inner().long_row()
    }

    fn to_record(&self) -> String {
        self.inner().to_record()
    }

    fn meeting_string(&self) -> String {
        self.inner().meeting_string()
    }
}

impl From<Course> for Activity {
    fn from(course: Course) -> Self {
        Self::Course(course)
    }
}

impl From<Event> for Activity {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

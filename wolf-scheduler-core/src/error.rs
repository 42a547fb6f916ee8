use std::fmt;

use thiserror::Error;

use crate::activity::ActivityKind;

/// Field rejected by a validating constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    CourseName,
    Section,
    Credits,
    InstructorId,
    MeetingDays,
    MeetingTime,
    WeeklyRepeat,
    EventDetails,
    ScheduleTitle,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Title => "title",
            Self::CourseName => "course name",
            Self::Section => "section",
            Self::Credits => "credits",
            Self::InstructorId => "instructor id",
            Self::MeetingDays => "meeting days",
            Self::MeetingTime => "meeting time",
            Self::WeeklyRepeat => "weekly repeat",
            Self::EventDetails => "event details",
            Self::ScheduleTitle => "schedule title",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid {0}.")]
    InvalidField(Field),

    #[error("You are already enrolled in {0}")]
    DuplicateEnrollment(String),

    #[error("You have already created an event called {0}")]
    DuplicateEvent(String),

    #[error("The {kind} cannot be added due to a conflict with {with}.")]
    Conflict { kind: ActivityKind, with: String },

    #[error("Malformed record: {message}")]
    Record { message: String },

    #[error("Record I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn record(message: impl Into<String>) -> Self {
        Self::Record {
            message: message.into(),
        }
    }

    /// 是否属于调用方输入不合法（而不是排课语义冲突或I/O失败）
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidField(_) | Self::Record { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

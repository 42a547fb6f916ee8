use serde::Serialize;

use crate::{
    Result,
    activity::{Activity, ActivityKind, LongRow, Meeting, Schedulable, ShortRow},
    error::{Error, Field},
};

const MIN_WEEKLY_REPEAT: u8 = 1;
const MAX_WEEKLY_REPEAT: u8 = 4;

/// 个人周期性事件
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Event {
    /// 每N周重复一次 (1-4)
    weekly_repeat: u8,
    /// 事件详情，可以为空
    event_details: String,
    #[serde(flatten)]
    meeting: Meeting,
}

impl Event {
    pub fn new(
        title: impl Into<String>,
        days: &str,
        start: u16,
        end: u16,
        weekly_repeat: u8,
        event_details: impl Into<String>,
    ) -> Result<Self> {
        let meeting = Meeting::new(ActivityKind::Event, title, days, start, end)?;
        validate_weekly_repeat(weekly_repeat)?;

        Ok(Self {
            weekly_repeat,
            event_details: event_details.into(),
            meeting,
        })
    }

    pub const fn weekly_repeat(&self) -> u8 {
        self.weekly_repeat
    }

    pub fn event_details(&self) -> &str {
        &self.event_details
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        self.meeting.set_title(title)
    }

    /// 修改上课日与时间，可使用周末；校验失败时保持原值
    pub fn set_meeting_days_and_time(&mut self, days: &str, start: u16, end: u16) -> Result<()> {
        self.meeting
            .set_days_and_time(ActivityKind::Event, days, start, end)
    }

    pub fn set_weekly_repeat(&mut self, weekly_repeat: u8) -> Result<()> {
        validate_weekly_repeat(weekly_repeat)?;
        self.weekly_repeat = weekly_repeat;
        Ok(())
    }

    pub fn set_event_details(&mut self, event_details: impl Into<String>) {
        self.event_details = event_details.into();
    }
}

fn validate_weekly_repeat(weekly_repeat: u8) -> Result<()> {
    if (MIN_WEEKLY_REPEAT..=MAX_WEEKLY_REPEAT).contains(&weekly_repeat) {
        Ok(())
    } else {
        Err(Error::InvalidField(Field::WeeklyRepeat))
    }
}

impl Schedulable for Event {
    fn meeting(&self) -> &Meeting {
        &self.meeting
    }

    fn kind(&self) -> ActivityKind {
        ActivityKind::Event
    }

    fn is_duplicate(&self, other: &Activity) -> bool {
        matches!(other, Activity::Event(event) if event.title() == self.title())
    }

    fn meeting_string(&self) -> String {
        format!(
            "{} (every {} weeks)",
            self.meeting.meeting_string(),
            self.weekly_repeat
        )
    }

    // 与课程行保持相同列位，课程独有的列留空
    fn short_row(&self) -> ShortRow {
        [
            String::new(),
            String::new(),
            self.title().to_string(),
            self.meeting_string(),
        ]
    }

    fn long_row(&self) -> LongRow {
        [
            String::new(),
            String::new(),
            self.title().to_string(),
            String::new(),
            String::new(),
            self.meeting_string(),
            self.event_details.clone(),
        ]
    }

    fn to_record(&self) -> String {
        let time = self.meeting.time();
        format!(
            "{},{},{},{},{},{}",
            self.title(),
            self.meeting.days(),
            time.start(),
            time.end(),
            self.weekly_repeat,
            self.event_details
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::Course;

    fn exercise() -> Event {
        Event::new("Exercise", "MWF", 800, 900, 2, "Gym").unwrap()
    }

    #[test]
    fn test_weekend_days_allowed() {
        let event = Event::new("Brunch", "SU", 1100, 1230, 1, "").unwrap();
        assert_eq!(event.meeting_string(), "SU 11:00AM-12:30PM (every 1 weeks)");
        assert_eq!(event.event_details(), "");
    }

    #[test]
    fn test_invalid_event_fields() {
        assert!(matches!(
            Event::new("Exercise", "A", 0, 0, 1, ""),
            Err(Error::InvalidField(Field::MeetingDays))
        ));
        assert!(matches!(
            Event::new("Exercise", "MW", 800, 900, 0, ""),
            Err(Error::InvalidField(Field::WeeklyRepeat))
        ));
        assert!(matches!(
            Event::new("Exercise", "MW", 800, 900, 5, ""),
            Err(Error::InvalidField(Field::WeeklyRepeat))
        ));
        assert!(matches!(
            Event::new("", "MW", 800, 900, 1, ""),
            Err(Error::InvalidField(Field::Title))
        ));
    }

    #[test]
    fn test_set_weekly_repeat_keeps_value_on_error() {
        let mut event = exercise();
        assert!(event.set_weekly_repeat(7).is_err());
        assert_eq!(event.weekly_repeat(), 2);
        event.set_weekly_repeat(4).unwrap();
        assert_eq!(event.weekly_repeat(), 4);
    }

    #[test]
    fn test_set_meeting_fields_keeps_value_on_error() {
        let mut event = exercise();
        assert!(event.set_meeting_days_and_time("A", 0, 0).is_err());
        assert!(event.set_meeting_days_and_time("MX", 800, 900).is_err());
        assert!(event.set_meeting_days_and_time("SU", 900, 800).is_err());
        assert!(event.set_title("").is_err());
        assert_eq!(event, exercise());

        event.set_meeting_days_and_time("SU", 1000, 1130).unwrap();
        event.set_title("Long Run").unwrap();
        assert_eq!(event.title(), "Long Run");
        assert_eq!(event.meeting_string(), "SU 10:00AM-11:30AM (every 2 weeks)");
    }

    #[test]
    fn test_duplicate_by_title() {
        let event = exercise();
        let same_title = Event::new("Exercise", "TH", 1800, 1900, 1, "Run").unwrap();
        let course = Course::new("HESF10", "Exercise", "001", 1, "coach", "TH", 700, 750).unwrap();

        assert!(event.is_duplicate(&Activity::from(same_title)));
        assert!(!event.is_duplicate(&Activity::from(course)));
    }

    #[test]
    fn test_rows_match_course_layout() {
        let event = exercise();
        assert_eq!(
            event.short_row(),
            ["", "", "Exercise", "MWF 8:00AM-9:00AM (every 2 weeks)"]
        );
        assert_eq!(
            event.long_row(),
            [
                "",
                "",
                "Exercise",
                "",
                "",
                "MWF 8:00AM-9:00AM (every 2 weeks)",
                "Gym"
            ]
        );
    }

    #[test]
    fn test_record_line() {
        assert_eq!(exercise().to_record(), "Exercise,MWF,800,900,2,Gym");
        assert_eq!(
            Activity::from(exercise()).to_record(),
            "Exercise,MWF,800,900,2,Gym"
        );
    }

    #[test]
    fn test_activity_meeting_string_uses_event_suffix() {
        let activity = Activity::from(exercise());
        assert_eq!(
            activity.meeting_string(),
            "MWF 8:00AM-9:00AM (every 2 weeks)"
        );
    }
}

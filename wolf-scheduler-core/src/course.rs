use serde::Serialize;

use crate::{
    Result,
    activity::{Activity, ActivityKind, LongRow, Meeting, Schedulable, ShortRow},
    error::{Error, Field},
};

/// 课程代码最短长度
const MIN_NAME_LENGTH: usize = 4;
/// 课程代码最长长度
const MAX_NAME_LENGTH: usize = 6;
/// 班级号位数
const SECTION_LENGTH: usize = 3;
const MIN_CREDITS: u8 = 1;
const MAX_CREDITS: u8 = 5;

/// 课程目录中的一个教学班
///
/// `(name, section)` 是目录查找键；排课查重只看 `name`。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Course {
    /// 课程代码，如 `CSC216`
    name: String,
    /// 三位数字班级号
    section: String,
    /// 学分 (1-5)
    credits: u8,
    /// 任课教师ID
    instructor_id: String,
    #[serde(flatten)]
    meeting: Meeting,
}

impl Course {
    /// 创建有固定上课时间的课程（`days` 为 `A` 时时间须为0）
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        section: impl Into<String>,
        credits: u8,
        instructor_id: impl Into<String>,
        days: &str,
        start: u16,
        end: u16,
    ) -> Result<Self> {
        let meeting = Meeting::new(ActivityKind::Course, title, days, start, end)?;

        let name = name.into();
        validate_name(&name)?;
        let section = section.into();
        validate_section(&section)?;
        validate_credits(credits)?;
        let instructor_id = instructor_id.into();
        validate_instructor_id(&instructor_id)?;

        Ok(Self {
            name,
            section,
            credits,
            instructor_id,
            meeting,
        })
    }

    /// 创建时间待定（Arranged）的课程
    pub fn arranged(
        name: impl Into<String>,
        title: impl Into<String>,
        section: impl Into<String>,
        credits: u8,
        instructor_id: impl Into<String>,
    ) -> Result<Self> {
        Self::new(name, title, section, credits, instructor_id, "A", 0, 0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub const fn credits(&self) -> u8 {
        self.credits
    }

    pub fn instructor_id(&self) -> &str {
        &self.instructor_id
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        self.meeting.set_title(title)
    }

    pub fn set_section(&mut self, section: impl Into<String>) -> Result<()> {
        let section = section.into();
        validate_section(&section)?;
        self.section = section;
        Ok(())
    }

    pub fn set_credits(&mut self, credits: u8) -> Result<()> {
        validate_credits(credits)?;
        self.credits = credits;
        Ok(())
    }

    pub fn set_instructor_id(&mut self, instructor_id: impl Into<String>) -> Result<()> {
        let instructor_id = instructor_id.into();
        validate_instructor_id(&instructor_id)?;
        self.instructor_id = instructor_id;
        Ok(())
    }

    /// 修改上课日与时间；校验失败时保持原值
    pub fn set_meeting_days_and_time(&mut self, days: &str, start: u16, end: u16) -> Result<()> {
        self.meeting
            .set_days_and_time(ActivityKind::Course, days, start, end)
    }
}

fn validate_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if (MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len) {
        Ok(())
    } else {
        Err(Error::InvalidField(Field::CourseName))
    }
}

fn validate_section(section: &str) -> Result<()> {
    if section.len() == SECTION_LENGTH && section.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(Error::InvalidField(Field::Section))
    }
}

fn validate_credits(credits: u8) -> Result<()> {
    if (MIN_CREDITS..=MAX_CREDITS).contains(&credits) {
        Ok(())
    } else {
        Err(Error::InvalidField(Field::Credits))
    }
}

fn validate_instructor_id(instructor_id: &str) -> Result<()> {
    if instructor_id.is_empty() {
        Err(Error::InvalidField(Field::InstructorId))
    } else {
        Ok(())
    }
}

impl Schedulable for Course {
    fn meeting(&self) -> &Meeting {
        &self.meeting
    }

    fn kind(&self) -> ActivityKind {
        ActivityKind::Course
    }

    fn is_duplicate(&self, other: &Activity) -> bool {
        matches!(other, Activity::Course(course) if course.name == self.name)
    }

    fn short_row(&self) -> ShortRow {
        [
            self.name.clone(),
            self.section.clone(),
            self.title().to_string(),
            self.meeting_string(),
        ]
    }

    fn long_row(&self) -> LongRow {
        [
            self.name.clone(),
            self.section.clone(),
            self.title().to_string(),
            self.credits.to_string(),
            self.instructor_id.clone(),
            self.meeting_string(),
            String::new(),
        ]
    }

    fn to_record(&self) -> String {
        let head = format!(
            "{},{},{},{},{},{}",
            self.name,
            self.title(),
            self.section,
            self.credits,
            self.instructor_id,
            self.meeting.days()
        );
        if self.meeting.days().is_arranged() {
            head
        } else {
            let time = self.meeting.time();
            format!("{head},{},{}", time.start(), time.end())
        }
    }
}

use serde::Serialize;

use crate::{
    activity::{LongRow, Schedulable, ShortRow},
    course::Course,
};

/// 课程目录：本次会话中可选的全部教学班
///
/// 顺序与记录文件一致，`(name, section)` 唯一。
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按顺序建立目录，重复的 `(name, section)` 保留第一次出现的条目
    pub fn from_courses(courses: impl IntoIterator<Item = Course>) -> Self {
        let mut catalog = Self::new();
        for course in courses {
            if catalog.find(course.name(), course.section()).is_some() {
                tracing::debug!(
                    "丢弃重复的教学班: {}-{}",
                    course.name(),
                    course.section()
                );
                continue;
            }
            catalog.courses.push(course);
        }
        catalog
    }

    /// 按课程代码与班级号查找
    pub fn find(&self, name: &str, section: &str) -> Option<&Course> {
        self.courses
            .iter()
            .find(|course| course.name() == name && course.section() == section)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    pub fn into_courses(self) -> Vec<Course> {
        self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn short_rows(&self) -> Vec<ShortRow> {
        self.courses.iter().map(Schedulable::short_row).collect()
    }

    pub fn long_rows(&self) -> Vec<LongRow> {
        self.courses.iter().map(Schedulable::long_row).collect()
    }
}

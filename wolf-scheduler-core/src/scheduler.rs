use std::path::Path;

use serde::Serialize;

use crate::{
    Result,
    activity::{LongRow, ShortRow},
    catalog::Catalog,
    course::Course,
    records,
    schedule::Schedule,
};

/// 一次排课会话：只读的课程目录加上可修改的个人日程
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scheduler {
    catalog: Catalog,
    schedule: Schedule,
}

impl Scheduler {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            schedule: Schedule::new(),
        }
    }

    /// 从课程记录文件加载目录，文件不存在时返回I/O错误
    pub fn from_record_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let courses = records::read_course_records_from_path(path)?;
        tracing::info!("从 {} 加载了 {} 个教学班", path.display(), courses.len());
        Ok(Self::new(Catalog::from_courses(courses)))
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub const fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn title(&self) -> &str {
        self.schedule.title()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.schedule.rename(title);
    }

    pub fn find_course(&self, name: &str, section: &str) -> Option<&Course> {
        self.catalog.find(name, section)
    }

    pub fn add_course(&mut self, name: &str, section: &str) -> Result<bool> {
        self.schedule.add_course(&self.catalog, name, section)
    }

    pub fn add_event(
        &mut self,
        title: &str,
        days: &str,
        start: u16,
        end: u16,
        weekly_repeat: u8,
        event_details: &str,
    ) -> Result<()> {
        self.schedule
            .add_event(title, days, start, end, weekly_repeat, event_details)
    }

    pub fn remove_activity(&mut self, index: usize) -> bool {
        self.schedule.remove(index)
    }

    pub fn reset_schedule(&mut self) {
        self.schedule.reset();
    }

    pub fn catalog_rows(&self) -> Vec<ShortRow> {
        self.catalog.short_rows()
    }

    pub fn schedule_rows(&self) -> Vec<ShortRow> {
        self.schedule.short_rows()
    }

    pub fn full_schedule_rows(&self) -> Vec<LongRow> {
        self.schedule.long_rows()
    }

    /// 将当前日程写成记录文件
    pub fn export_schedule(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        records::write_activity_records_to_path(path, self.schedule.activities())?;
        tracing::info!(
            "已导出 {} 条日程到 {}",
            self.schedule.len(),
            path.display()
        );
        Ok(())
    }
}

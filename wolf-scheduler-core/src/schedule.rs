//! The student's working schedule.
//!
//! Every insertion scans the current entries in order. For each entry the
//! candidate is first checked for a duplicate, then for a time conflict, and the
//! first failure aborts the insertion with nothing committed.

use serde::Serialize;

use crate::{
    Result,
    activity::{Activity, LongRow, Schedulable, ShortRow},
    catalog::Catalog,
    error::Error,
    event::Event,
};

/// Title given to a new or reset schedule.
pub const DEFAULT_TITLE: &str = "My Schedule";

#[derive(Debug, Clone, Serialize)]
pub struct Schedule {
    title: String,
    activities: Vec<Activity>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            activities: Vec::new(),
        }
    }
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn get(&self, index: usize) -> Option<&Activity> {
        self.activities.get(index)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Enrolls in the catalog section `(name, section)`.
    ///
    /// Returns `Ok(false)` when the catalog has no such section.
    pub fn add_course(&mut self, catalog: &Catalog, name: &str, section: &str) -> Result<bool> {
        let Some(course) = catalog.find(name, section) else {
            tracing::debug!("目录中不存在教学班: {}-{}", name, section);
            return Ok(false);
        };
        self.add_activity(course.clone().into())?;
        Ok(true)
    }

    /// Builds and adds a personal event. Field validation happens before the
    /// schedule is consulted.
    pub fn add_event(
        &mut self,
        title: &str,
        days: &str,
        start: u16,
        end: u16,
        weekly_repeat: u8,
        event_details: &str,
    ) -> Result<()> {
        let event = Event::new(title, days, start, end, weekly_repeat, event_details)?;
        self.add_activity(event.into())
    }

    /// Appends `candidate` if it is neither a duplicate of nor in conflict with
    /// any current entry.
    pub fn add_activity(&mut self, candidate: Activity) -> Result<()> {
        for existing in &self.activities {
            if candidate.is_duplicate(existing) {
                return Err(match &candidate {
                    Activity::Course(course) => {
                        Error::DuplicateEnrollment(course.name().to_string())
                    }
                    Activity::Event(event) => Error::DuplicateEvent(event.title().to_string()),
                });
            }

            if existing.check_conflict(&candidate).is_err() {
                return Err(Error::Conflict {
                    kind: candidate.kind(),
                    with: existing.title().to_string(),
                });
            }
        }

        tracing::info!(
            "已添加{}: {} ({})",
            candidate.kind(),
            candidate.title(),
            candidate.meeting_string()
        );
        self.activities.push(candidate);
        Ok(())
    }

    /// Removes the entry at `index`, keeping the order of the rest.
    ///
    /// Returns `false` for an index past the end.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.activities.len() {
            return false;
        }
        let removed = self.activities.remove(index);
        tracing::info!("已移除{}: {}", removed.kind(), removed.title());
        true
    }

    pub fn reset(&mut self) {
        self.activities.clear();
        self.title = DEFAULT_TITLE.to_string();
    }

    pub fn short_rows(&self) -> Vec<ShortRow> {
        self.activities.iter().map(Schedulable::short_row).collect()
    }

    pub fn long_rows(&self) -> Vec<LongRow> {
        self.activities.iter().map(Schedulable::long_row).collect()
    }
}

#[cfg(test)]
mod tests;

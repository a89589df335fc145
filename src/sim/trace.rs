//! Course-change notifications.

use serde::Serialize;

use crate::mobility::CourseChange;

/// Receives a notification every time a satellite's cached position is
/// updated.
pub trait CourseChangeSink {
    fn course_changed(&mut self, satellite: &str, change: &CourseChange);
}

/// A sink that drops every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl CourseChangeSink for NullSink {
    fn course_changed(&mut self, _satellite: &str, _change: &CourseChange) {}
}

/// One recorded notification.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CourseChangeRecord {
    /// Satellite that changed course
    pub satellite: String,
    #[serde(flatten)]
    pub change: CourseChange,
}

/// Records every notification in arrival order.
#[derive(Serialize, Debug, Default, Clone)]
pub struct CourseChangeLog {
    pub records: Vec<CourseChangeRecord>,
}

impl CourseChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records for one satellite.
    pub fn for_satellite<'a>(
        &'a self,
        satellite: &'a str,
    ) -> impl Iterator<Item = &'a CourseChangeRecord> + 'a {
        self.records.iter().filter(move |r| r.satellite == satellite)
    }
}

impl CourseChangeSink for CourseChangeLog {
    fn course_changed(&mut self, satellite: &str, change: &CourseChange) {
        self.records.push(CourseChangeRecord {
            satellite: satellite.to_string(),
            change: change.clone(),
        });
    }
}

impl<F> CourseChangeSink for F
where
    F: FnMut(&str, &CourseChange),
{
    fn course_changed(&mut self, satellite: &str, change: &CourseChange) {
        self(satellite, change)
    }
}

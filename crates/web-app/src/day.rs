//! View model of one programme day.

use chrono::Duration;
use fitdesk_domain as domain;

use crate::{
    notification::Notifications,
    remote::{Remote, RequestToken, Resolution},
};

/// Owns the flat exercise records of the currently shown day and the buckets
/// derived from them.
///
/// The records are replaced wholesale on every fetch and the buckets are
/// recomputed from scratch. A failed fetch keeps the previously shown buckets
/// and surfaces a notification.
#[derive(Debug, Default)]
pub struct DayView {
    exercises: Remote<Vec<domain::ProgrammeExercise>>,
    buckets: Vec<domain::ExerciseBucket>,
}

impl DayView {
    pub fn start_fetch(&mut self) -> RequestToken {
        self.exercises.start()
    }

    pub fn apply(
        &mut self,
        token: RequestToken,
        result: Result<Vec<domain::ProgrammeExercise>, String>,
        notifications: &mut Notifications,
    ) {
        match self.exercises.resolve(token, result) {
            Resolution::Updated => {
                self.buckets = domain::build_buckets(self.records());
            }
            Resolution::Failed => {
                if let Some(message) = self.exercises.error() {
                    notifications.error(format!("Failed to load day exercises: {message}"));
                }
            }
            Resolution::Stale => {}
        }
    }

    #[must_use]
    pub fn buckets(&self) -> &[domain::ExerciseBucket] {
        &self.buckets
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.exercises.is_loading()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        domain::day_duration(self.records())
    }

    #[must_use]
    pub fn num_sets(&self) -> u32 {
        domain::day_num_sets(self.records())
    }

    fn records(&self) -> &[domain::ProgrammeExercise] {
        self.exercises.data().map_or(&[], Vec::as_slice)
    }
}

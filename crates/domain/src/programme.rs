use std::collections::BTreeMap;

use chrono::Duration;
use derive_more::{AsRef, Deref, Display};
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, Exercise, ExerciseSet, Name, ReadError, Reps, Tempo, Time,
    UpdateError, ValidationError, Weight,
};

#[allow(async_fn_in_trait)]
pub trait ProgrammeService {
    async fn get_programmes(&self) -> Result<Vec<Programme>, ReadError>;
    async fn create_programme(
        &self,
        name: Name,
        description: String,
    ) -> Result<Programme, CreateError>;
    async fn modify_programme(
        &self,
        id: ProgrammeID,
        name: Option<Name>,
        description: Option<String>,
        archived: Option<bool>,
    ) -> Result<Programme, UpdateError>;
    async fn delete_programme(&self, id: ProgrammeID) -> Result<ProgrammeID, DeleteError>;
    async fn create_day(
        &self,
        programme_id: ProgrammeID,
        name: Name,
    ) -> Result<ProgrammeDay, CreateError>;
    async fn delete_day(&self, id: DayID) -> Result<DayID, DeleteError>;

    async fn validate_programme_name(
        &self,
        name: &str,
        id: ProgrammeID,
    ) -> Result<Name, ValidationError> {
        match Name::new(name) {
            Ok(name) => match self.get_programmes().await {
                Ok(programmes) => {
                    if programmes.iter().all(|p| p.id == id || p.name != name) {
                        Ok(name)
                    } else {
                        Err(ValidationError::Conflict("name".to_string()))
                    }
                }
                Err(err) => Err(ValidationError::Other(err.into())),
            },
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ProgrammeRepository {
    async fn read_programmes(&self) -> Result<Vec<Programme>, ReadError>;
    async fn create_programme(
        &self,
        name: Name,
        description: String,
    ) -> Result<Programme, CreateError>;
    async fn modify_programme(
        &self,
        id: ProgrammeID,
        name: Option<Name>,
        description: Option<String>,
        archived: Option<bool>,
    ) -> Result<Programme, UpdateError>;
    async fn delete_programme(&self, id: ProgrammeID) -> Result<ProgrammeID, DeleteError>;
    async fn create_day(
        &self,
        programme_id: ProgrammeID,
        name: Name,
    ) -> Result<ProgrammeDay, CreateError>;
    async fn delete_day(&self, id: DayID) -> Result<DayID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait DayExerciseService {
    async fn get_day_exercises(&self, day_id: DayID)
    -> Result<Vec<ProgrammeExercise>, ReadError>;
    async fn get_day_buckets(&self, day_id: DayID) -> Result<Vec<ExerciseBucket>, ReadError>;
    async fn add_set(
        &self,
        id: ProgrammeExerciseID,
        set: ExerciseSet,
    ) -> Result<ProgrammeExercise, CreateError>;
    async fn duplicate_set(
        &self,
        id: ProgrammeExerciseID,
        set_no: u32,
    ) -> Result<ProgrammeExercise, CreateError>;
    async fn remove_set(&self, id: ProgrammeExerciseID, set_no: u32) -> Result<u32, DeleteError>;

    fn validate_set_reps(&self, reps: &str) -> Result<Reps, ValidationError> {
        Reps::try_from(reps).map_err(|err| ValidationError::Other(err.into()))
    }

    fn validate_set_time(&self, time: &str) -> Result<Time, ValidationError> {
        Time::try_from(time).map_err(|err| ValidationError::Other(err.into()))
    }

    fn validate_set_weight(&self, weight: &str) -> Result<Weight, ValidationError> {
        Weight::try_from(weight).map_err(|err| ValidationError::Other(err.into()))
    }

    fn validate_set_tempo(&self, tempo: &str) -> Result<Tempo, ValidationError> {
        Tempo::try_from(tempo).map_err(|err| ValidationError::Other(err.into()))
    }
}

#[allow(async_fn_in_trait)]
pub trait DayExerciseRepository {
    async fn read_day_exercises(
        &self,
        day_id: DayID,
    ) -> Result<Vec<ProgrammeExercise>, ReadError>;
    async fn create_set(
        &self,
        id: ProgrammeExerciseID,
        set: ExerciseSet,
    ) -> Result<ProgrammeExercise, CreateError>;
    async fn duplicate_set(
        &self,
        id: ProgrammeExerciseID,
        set_no: u32,
    ) -> Result<ProgrammeExercise, CreateError>;
    async fn delete_set(&self, id: ProgrammeExerciseID, set_no: u32) -> Result<u32, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Programme {
    pub id: ProgrammeID,
    pub name: Name,
    pub description: String,
    pub archived: bool,
    pub days: Vec<ProgrammeDay>,
}

impl Programme {
    /// Days in their scheduled order, regardless of the order they arrived in.
    #[must_use]
    pub fn days_in_order(&self) -> Vec<&ProgrammeDay> {
        let mut days = self.days.iter().collect::<Vec<_>>();
        days.sort_by_key(|d| d.position);
        days
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProgrammeID(Uuid);

impl ProgrammeID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ProgrammeID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ProgrammeID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgrammeDay {
    pub id: DayID,
    pub name: Name,
    pub position: u32,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DayID(Uuid);

impl DayID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for DayID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for DayID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// One exercise instance scheduled on a programme day.
///
/// Records arrive as a flat list. `group` and `group_set_no` identify the
/// superset/circuit the record belongs to, `group_sort_order` positions that
/// cluster within the day and `sort_order` positions the record within its
/// cluster. The sort fields come from the backend and may be absent on
/// malformed records.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgrammeExercise {
    pub id: ProgrammeExerciseID,
    pub group: GroupKey,
    pub group_set_no: u32,
    pub group_sort_order: Option<u32>,
    pub sort_order: Option<u32>,
    pub exercise: Exercise,
    pub sets: Vec<ExerciseSet>,
}

impl ProgrammeExercise {
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.sets.iter().map(ExerciseSet::duration).sum()
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProgrammeExerciseID(Uuid);

impl ProgrammeExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ProgrammeExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ProgrammeExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn new(key: &str) -> Result<Self, GroupKeyError> {
        let trimmed_key = key.trim();

        if trimmed_key.is_empty() {
            return Err(GroupKeyError::Empty);
        }

        Ok(Self(trimmed_key.to_string()))
    }

    /// Display label for the group key.
    ///
    /// Unknown keys are shown as-is.
    #[must_use]
    pub fn label(&self) -> String {
        const LABELS: [(&str, &str); 6] = [
            ("warm_up", "Warm-up"),
            ("cool_down", "Cool-down"),
            ("straight_set", "Straight Set"),
            ("superset", "Superset"),
            ("circuit", "Circuit"),
            ("giant_set", "Giant Set"),
        ];

        for (key, label) in LABELS {
            if self.0 == key {
                return label.to_string();
            }
            if let Some(suffix) = self
                .0
                .strip_prefix(key)
                .and_then(|rest| rest.strip_prefix('_'))
            {
                return format!("{label} {}", suffix.to_uppercase());
            }
        }

        self.0.clone()
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GroupKeyError {
    #[error("Group key must not be empty")]
    Empty,
}

/// One renderable cluster of a programme day.
///
/// Derived from the day's flat records by [`build_buckets`], discarded and
/// rebuilt on every fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseBucket {
    pub set_no_group: u32,
    pub group: GroupKey,
    pub exercises: Vec<ProgrammeExercise>,
}

impl ExerciseBucket {
    #[must_use]
    pub fn label(&self) -> String {
        self.group.label()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.exercises.iter().map(ProgrammeExercise::duration).sum()
    }

    #[must_use]
    pub fn num_sets(&self) -> u32 {
        self.exercises
            .iter()
            .map(|e| u32::try_from(e.sets.len()).unwrap_or(u32::MAX))
            .sum()
    }

    fn sort_order(&self) -> u32 {
        self.exercises
            .first()
            .and_then(|e| e.group_sort_order)
            .unwrap_or(u32::MAX)
    }
}

/// Partition a day's flat records into renderable buckets.
///
/// Records are grouped by (`group_set_no`, `group`). Exercises within a bucket
/// are ordered by `sort_order`, buckets by the `group_sort_order` of their
/// first exercise. Missing sort fields order last. All ordering is derived
/// from the sort fields on the records, never from arrival order.
#[must_use]
pub fn build_buckets(records: &[ProgrammeExercise]) -> Vec<ExerciseBucket> {
    let mut groups: BTreeMap<(u32, GroupKey), Vec<ProgrammeExercise>> = BTreeMap::new();

    for record in records {
        groups
            .entry((record.group_set_no, record.group.clone()))
            .or_default()
            .push(record.clone());
    }

    let mut buckets = groups
        .into_iter()
        .map(|((set_no_group, group), mut exercises)| {
            exercises.sort_by_key(|e| e.sort_order.unwrap_or(u32::MAX));
            ExerciseBucket {
                set_no_group,
                group,
                exercises,
            }
        })
        .collect::<Vec<_>>();

    buckets.sort_by_key(ExerciseBucket::sort_order);

    buckets
}

#[must_use]
pub fn day_duration(records: &[ProgrammeExercise]) -> Duration {
    records.iter().map(ProgrammeExercise::duration).sum()
}

#[must_use]
pub fn day_num_sets(records: &[ProgrammeExercise]) -> u32 {
    records
        .iter()
        .map(|e| u32::try_from(e.sets.len()).unwrap_or(u32::MAX))
        .sum()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Level, Reps, Tempo, Time};

    use super::*;

    fn record(
        id: u128,
        group: &str,
        group_set_no: u32,
        group_sort_order: Option<u32>,
        sort_order: Option<u32>,
    ) -> ProgrammeExercise {
        ProgrammeExercise {
            id: id.into(),
            group: GroupKey::new(group).unwrap(),
            group_set_no,
            group_sort_order,
            sort_order,
            exercise: Exercise {
                id: id.into(),
                title: Name::new("Back Squat").unwrap(),
                image: None,
                level: Level::Intermediate,
            },
            sets: vec![ExerciseSet {
                set_no: 1,
                reps: Some(Reps::new(10).unwrap()),
                rest_time: Some(Time::new(60).unwrap()),
                tempo: Some(Tempo::new("2-0-2").unwrap()),
                weight: None,
                attributes: Vec::new(),
            }],
        }
    }

    fn ids(buckets: &[ExerciseBucket]) -> Vec<Vec<ProgrammeExerciseID>> {
        buckets
            .iter()
            .map(|b| b.exercises.iter().map(|e| e.id).collect())
            .collect()
    }

    #[test]
    fn test_build_buckets_empty() {
        assert_eq!(build_buckets(&[]), Vec::new());
    }

    #[test]
    fn test_build_buckets_single_group() {
        let records = [
            record(2, "superset_a", 1, Some(1), Some(2)),
            record(1, "superset_a", 1, Some(1), Some(1)),
        ];
        let buckets = build_buckets(&records);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].set_no_group, 1);
        assert_eq!(buckets[0].group, GroupKey::new("superset_a").unwrap());
        assert_eq!(ids(&buckets), vec![vec![1.into(), 2.into()]]);
    }

    #[test]
    fn test_build_buckets_ordered_by_group_sort_order() {
        let records = [
            record(1, "superset_a", 1, Some(2), Some(1)),
            record(2, "superset_a", 1, Some(2), Some(2)),
            record(3, "circuit_b", 2, Some(1), Some(1)),
            record(4, "circuit_b", 2, Some(1), Some(2)),
        ];
        let buckets = build_buckets(&records);
        assert_eq!(
            ids(&buckets),
            vec![vec![3.into(), 4.into()], vec![1.into(), 2.into()]]
        );
        assert_eq!(buckets[0].set_no_group, 2);
        assert_eq!(buckets[1].set_no_group, 1);
    }

    #[test]
    fn test_build_buckets_distinct_groups_within_set_no() {
        let records = [
            record(1, "superset_a", 1, Some(1), Some(1)),
            record(2, "superset_b", 1, Some(2), Some(1)),
        ];
        let buckets = build_buckets(&records);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].group, GroupKey::new("superset_a").unwrap());
        assert_eq!(buckets[1].group, GroupKey::new("superset_b").unwrap());
        assert!(buckets.iter().all(|b| b.set_no_group == 1));
    }

    #[test]
    fn test_build_buckets_complete_partition() {
        let records = [
            record(1, "superset_a", 1, Some(1), Some(1)),
            record(2, "superset_b", 1, Some(2), Some(1)),
            record(3, "circuit_a", 2, Some(3), Some(1)),
            record(4, "circuit_a", 2, Some(3), Some(2)),
            record(5, "cool_down", 3, Some(4), Some(1)),
        ];
        let buckets = build_buckets(&records);
        let mut flattened = buckets
            .iter()
            .flat_map(|b| b.exercises.iter().map(|e| e.id))
            .collect::<Vec<_>>();
        flattened.sort();
        assert_eq!(
            flattened,
            records.iter().map(|r| r.id).collect::<Vec<_>>()
        );
        for bucket in &buckets {
            for exercise in &bucket.exercises {
                assert_eq!(exercise.group_set_no, bucket.set_no_group);
                assert_eq!(exercise.group, bucket.group);
            }
        }
    }

    #[test]
    fn test_build_buckets_arrival_order_irrelevant() {
        let records = [
            record(1, "superset_a", 1, Some(1), Some(1)),
            record(2, "superset_b", 1, Some(2), Some(1)),
            record(3, "circuit_a", 2, Some(3), Some(1)),
            record(4, "circuit_a", 2, Some(3), Some(2)),
        ];
        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(build_buckets(&records), build_buckets(&reversed));
        assert_eq!(build_buckets(&records), build_buckets(&records));
    }

    #[test]
    fn test_build_buckets_missing_sort_fields_order_last() {
        let records = [
            record(1, "superset_a", 1, None, Some(1)),
            record(2, "circuit_b", 2, Some(1), None),
            record(3, "circuit_b", 2, Some(1), Some(1)),
        ];
        let buckets = build_buckets(&records);
        assert_eq!(
            ids(&buckets),
            vec![vec![3.into(), 2.into()], vec![1.into()]]
        );
    }

    #[test]
    fn test_build_buckets_equal_group_sort_order_ties_are_deterministic() {
        let records = [
            record(1, "superset_b", 2, Some(1), Some(1)),
            record(2, "superset_a", 1, Some(1), Some(1)),
        ];
        let buckets = build_buckets(&records);
        assert_eq!(ids(&buckets), vec![vec![2.into()], vec![1.into()]]);
    }

    #[rstest]
    #[case("warm_up", "Warm-up")]
    #[case("cool_down", "Cool-down")]
    #[case("superset", "Superset")]
    #[case("superset_a", "Superset A")]
    #[case("circuit_1", "Circuit 1")]
    #[case("giant_set_b", "Giant Set B")]
    #[case("straight_set", "Straight Set")]
    #[case("finisher", "finisher")]
    fn test_group_key_label(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(GroupKey::new(key).unwrap().label(), expected);
    }

    #[rstest]
    #[case("superset_a", Ok(GroupKey("superset_a".to_string())))]
    #[case("  circuit  ", Ok(GroupKey("circuit".to_string())))]
    #[case(" ", Err(GroupKeyError::Empty))]
    fn test_group_key_new(#[case] key: &str, #[case] expected: Result<GroupKey, GroupKeyError>) {
        assert_eq!(GroupKey::new(key), expected);
    }

    #[test]
    fn test_day_duration_and_num_sets() {
        let records = [
            record(1, "superset_a", 1, Some(1), Some(1)),
            record(2, "superset_a", 1, Some(1), Some(2)),
        ];
        assert_eq!(day_duration(&records), Duration::seconds(200));
        assert_eq!(day_num_sets(&records), 2);
    }

    #[test]
    fn test_bucket_label_and_metrics() {
        let buckets = build_buckets(&[
            record(1, "superset_a", 1, Some(1), Some(1)),
            record(2, "superset_a", 1, Some(1), Some(2)),
        ]);
        assert_eq!(buckets[0].label(), "Superset A");
        assert_eq!(buckets[0].num_sets(), 2);
        assert_eq!(buckets[0].duration(), Duration::seconds(200));
    }

    #[test]
    fn test_programme_days_in_order() {
        let programme = Programme {
            id: 1.into(),
            name: Name::new("Hypertrophy Block").unwrap(),
            description: String::new(),
            archived: false,
            days: vec![
                ProgrammeDay {
                    id: 2.into(),
                    name: Name::new("Pull Day").unwrap(),
                    position: 2,
                },
                ProgrammeDay {
                    id: 1.into(),
                    name: Name::new("Push Day").unwrap(),
                    position: 1,
                },
            ],
        };
        assert_eq!(
            programme
                .days_in_order()
                .iter()
                .map(|d| d.position)
                .collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_programme_id_nil() {
        assert!(ProgrammeID::nil().is_nil());
        assert_eq!(ProgrammeID::nil(), ProgrammeID::default());
    }

    #[test]
    fn test_day_id_nil() {
        assert!(DayID::nil().is_nil());
        assert_eq!(DayID::nil(), DayID::default());
    }

    #[test]
    fn test_programme_exercise_id_nil() {
        assert!(ProgrammeExerciseID::nil().is_nil());
        assert_eq!(ProgrammeExerciseID::nil(), ProgrammeExerciseID::default());
    }
}

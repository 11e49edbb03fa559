//! Wire types of the platform API.
//!
//! The backend JSON is decoded into these types and converted into domain
//! types exactly once, at the fetch boundary. Nullable fields stay optional
//! here; the domain decides how to handle their absence.

use fitdesk_domain as domain;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DecodeError {
    #[error(transparent)]
    Name(#[from] domain::NameError),
    #[error(transparent)]
    Level(#[from] domain::LevelError),
    #[error(transparent)]
    GroupKey(#[from] domain::GroupKeyError),
    #[error(transparent)]
    Reps(#[from] domain::RepsError),
    #[error(transparent)]
    Time(#[from] domain::TimeError),
    #[error(transparent)]
    Weight(#[from] domain::WeightError),
    #[error(transparent)]
    Tempo(#[from] domain::TempoError),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: Uuid,
    pub title: String,
    pub image: Option<String>,
    pub level: u8,
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = DecodeError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(domain::Exercise {
            id: value.id.into(),
            title: domain::Name::new(&value.title)?,
            image: value.image,
            level: domain::Level::try_from(value.level)?,
        })
    }
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Exercise {
            id: *value.id,
            title: value.title.to_string(),
            image: value.image.clone(),
            level: value.level as u8,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SetAttribute {
    pub name: String,
    pub value: String,
}

impl From<SetAttribute> for domain::SetAttribute {
    fn from(value: SetAttribute) -> Self {
        domain::SetAttribute {
            name: value.name,
            value: value.value,
        }
    }
}

impl From<&domain::SetAttribute> for SetAttribute {
    fn from(value: &domain::SetAttribute) -> Self {
        SetAttribute {
            name: value.name.clone(),
            value: value.value.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseSet {
    pub set_no: u32,
    pub reps: Option<u32>,
    pub rest_time: Option<u32>,
    pub tempo: Option<String>,
    pub weight: Option<f32>,
    #[serde(default)]
    pub attributes: Vec<SetAttribute>,
}

impl TryFrom<ExerciseSet> for domain::ExerciseSet {
    type Error = DecodeError;

    fn try_from(value: ExerciseSet) -> Result<Self, Self::Error> {
        Ok(domain::ExerciseSet {
            set_no: value.set_no,
            reps: value.reps.map(domain::Reps::new).transpose()?,
            rest_time: value.rest_time.map(domain::Time::new).transpose()?,
            tempo: value.tempo.as_deref().map(domain::Tempo::new).transpose()?,
            weight: value.weight.map(domain::Weight::new).transpose()?,
            attributes: value.attributes.into_iter().map(Into::into).collect(),
        })
    }
}

impl From<&domain::ExerciseSet> for ExerciseSet {
    fn from(value: &domain::ExerciseSet) -> Self {
        ExerciseSet {
            set_no: value.set_no,
            reps: value.reps.map(u32::from),
            rest_time: value.rest_time.map(u32::from),
            tempo: value.tempo.as_ref().map(ToString::to_string),
            weight: value.weight.map(f32::from),
            attributes: value.attributes.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProgrammeExercise {
    pub id: Uuid,
    pub group: String,
    pub group_set_no: u32,
    pub group_sort_order: Option<u32>,
    pub sort_order: Option<u32>,
    pub exercise: Exercise,
    pub sets: Vec<ExerciseSet>,
}

impl TryFrom<ProgrammeExercise> for domain::ProgrammeExercise {
    type Error = DecodeError;

    fn try_from(value: ProgrammeExercise) -> Result<Self, Self::Error> {
        Ok(domain::ProgrammeExercise {
            id: value.id.into(),
            group: domain::GroupKey::new(&value.group)?,
            group_set_no: value.group_set_no,
            group_sort_order: value.group_sort_order,
            sort_order: value.sort_order,
            exercise: value.exercise.try_into()?,
            sets: value
                .sets
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProgrammeDay {
    pub id: Uuid,
    pub name: String,
    pub position: u32,
}

impl TryFrom<ProgrammeDay> for domain::ProgrammeDay {
    type Error = DecodeError;

    fn try_from(value: ProgrammeDay) -> Result<Self, Self::Error> {
        Ok(domain::ProgrammeDay {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            position: value.position,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Programme {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub archived: bool,
    #[serde(default)]
    pub days: Vec<ProgrammeDay>,
}

impl TryFrom<Programme> for domain::Programme {
    type Error = DecodeError;

    fn try_from(value: Programme) -> Result<Self, Self::Error> {
        Ok(domain::Programme {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            description: value.description,
            archived: value.archived,
            days: value
                .days
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

use std::{collections::HashSet, slice::Iter};

use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, ReadError, UpdateError, ValidationError};

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn create_exercise(
        &self,
        title: Name,
        image: Option<String>,
        level: Level,
    ) -> Result<Exercise, CreateError>;
    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;

    async fn validate_exercise_title(
        &self,
        title: &str,
        id: ExerciseID,
    ) -> Result<Name, ValidationError> {
        match Name::new(title) {
            Ok(title) => match self.get_exercises().await {
                Ok(exercises) => {
                    if exercises.iter().all(|e| e.id == id || e.title != title) {
                        Ok(title)
                    } else {
                        Err(ValidationError::Conflict("title".to_string()))
                    }
                }
                Err(err) => Err(ValidationError::Other(err.into())),
            },
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn create_exercise(
        &self,
        title: Name,
        image: Option<String>,
        level: Level,
    ) -> Result<Exercise, CreateError>;
    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub title: Name,
    pub image: Option<String>,
    pub level: Level,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Level {
    #[default]
    Beginner = 1,
    Intermediate = 2,
    Advanced = 3,
}

impl Property for Level {
    fn iter() -> Iter<'static, Level> {
        static LEVELS: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];
        LEVELS.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = LevelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            x if x == Level::Beginner as u8 => Ok(Level::Beginner),
            x if x == Level::Intermediate as u8 => Ok(Level::Intermediate),
            x if x == Level::Advanced as u8 => Ok(Level::Advanced),
            _ => Err(LevelError::Invalid),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum LevelError {
    #[error("Invalid level")]
    Invalid,
}

pub trait Property: Clone + Copy + Sized {
    fn iter() -> Iter<'static, Self>;
    fn iter_filter() -> Iter<'static, Self> {
        Self::iter()
    }
    fn name(self) -> &'static str;
}

#[derive(Default, PartialEq)]
pub struct ExerciseFilter {
    pub title: String,
    pub levels: HashSet<Level>,
}

impl ExerciseFilter {
    #[must_use]
    pub fn exercises<'a>(
        &self,
        exercises: impl Iterator<Item = &'a Exercise>,
    ) -> Vec<&'a Exercise> {
        exercises
            .filter(|e| {
                e.title
                    .as_ref()
                    .to_lowercase()
                    .contains(self.title.to_lowercase().trim())
                    && (self.levels.is_empty() || self.levels.contains(&e.level))
            })
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.levels.is_empty()
    }

    #[must_use]
    pub fn level_list(&self) -> Vec<(Level, bool)> {
        Level::iter_filter()
            .map(|l| (*l, self.levels.contains(l)))
            .collect::<Vec<_>>()
    }

    pub fn toggle_level(&mut self, level: Level) {
        if self.levels.contains(&level) {
            self.levels.remove(&level);
        } else {
            self.levels.insert(level);
        }
    }
}

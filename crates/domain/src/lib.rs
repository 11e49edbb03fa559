#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod exercise;
pub mod name;
pub mod programme;
pub mod service;
pub mod set;

pub use error::{CreateError, DeleteError, ReadError, StorageError, UpdateError, ValidationError};
pub use exercise::{
    Exercise, ExerciseFilter, ExerciseID, ExerciseRepository, ExerciseService, Level, LevelError,
    Property,
};
pub use name::{Name, NameError};
pub use programme::{
    DayExerciseRepository, DayExerciseService, DayID, ExerciseBucket, GroupKey, GroupKeyError,
    Programme, ProgrammeDay, ProgrammeExercise, ProgrammeExerciseID, ProgrammeID,
    ProgrammeRepository, ProgrammeService, build_buckets, day_duration, day_num_sets,
};
pub use service::Service;
pub use set::{
    ExerciseSet, Reps, RepsError, SetAttribute, Tempo, TempoError, Time, TimeError, Weight,
    WeightError,
};

use log::{debug, error};

use crate::{
    CreateError, DayExerciseRepository, DayExerciseService, DayID, DeleteError, Exercise,
    ExerciseBucket, ExerciseID, ExerciseRepository, ExerciseService, ExerciseSet, Level, Name,
    Programme, ProgrammeDay, ProgrammeExercise, ProgrammeExerciseID, ProgrammeID,
    ProgrammeRepository, ProgrammeService, ReadError, UpdateError, build_buckets,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }

    async fn create_exercise(
        &self,
        title: Name,
        image: Option<String>,
        level: Level,
    ) -> Result<Exercise, CreateError> {
        log_on_error!(
            self.repository.create_exercise(title, image, level),
            CreateError,
            "create",
            "exercise"
        )
    }

    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError> {
        log_on_error!(
            self.repository.replace_exercise(exercise),
            UpdateError,
            "replace",
            "exercise"
        )
    }

    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError> {
        log_on_error!(
            self.repository.delete_exercise(id),
            DeleteError,
            "delete",
            "exercise"
        )
    }
}

impl<R: ProgrammeRepository> ProgrammeService for Service<R> {
    async fn get_programmes(&self) -> Result<Vec<Programme>, ReadError> {
        log_on_error!(
            self.repository.read_programmes(),
            ReadError,
            "get",
            "programmes"
        )
    }

    async fn create_programme(
        &self,
        name: Name,
        description: String,
    ) -> Result<Programme, CreateError> {
        log_on_error!(
            self.repository.create_programme(name, description),
            CreateError,
            "create",
            "programme"
        )
    }

    async fn modify_programme(
        &self,
        id: ProgrammeID,
        name: Option<Name>,
        description: Option<String>,
        archived: Option<bool>,
    ) -> Result<Programme, UpdateError> {
        log_on_error!(
            self.repository
                .modify_programme(id, name, description, archived),
            UpdateError,
            "modify",
            "programme"
        )
    }

    async fn delete_programme(&self, id: ProgrammeID) -> Result<ProgrammeID, DeleteError> {
        log_on_error!(
            self.repository.delete_programme(id),
            DeleteError,
            "delete",
            "programme"
        )
    }

    async fn create_day(
        &self,
        programme_id: ProgrammeID,
        name: Name,
    ) -> Result<ProgrammeDay, CreateError> {
        log_on_error!(
            self.repository.create_day(programme_id, name),
            CreateError,
            "create",
            "programme day"
        )
    }

    async fn delete_day(&self, id: DayID) -> Result<DayID, DeleteError> {
        log_on_error!(
            self.repository.delete_day(id),
            DeleteError,
            "delete",
            "programme day"
        )
    }
}

impl<R: DayExerciseRepository> DayExerciseService for Service<R> {
    async fn get_day_exercises(
        &self,
        day_id: DayID,
    ) -> Result<Vec<ProgrammeExercise>, ReadError> {
        log_on_error!(
            self.repository.read_day_exercises(day_id),
            ReadError,
            "get",
            "day exercises"
        )
    }

    async fn get_day_buckets(&self, day_id: DayID) -> Result<Vec<ExerciseBucket>, ReadError> {
        Ok(build_buckets(&self.get_day_exercises(day_id).await?))
    }

    async fn add_set(
        &self,
        id: ProgrammeExerciseID,
        set: ExerciseSet,
    ) -> Result<ProgrammeExercise, CreateError> {
        log_on_error!(
            self.repository.create_set(id, set),
            CreateError,
            "add",
            "set"
        )
    }

    async fn duplicate_set(
        &self,
        id: ProgrammeExerciseID,
        set_no: u32,
    ) -> Result<ProgrammeExercise, CreateError> {
        log_on_error!(
            self.repository.duplicate_set(id, set_no),
            CreateError,
            "duplicate",
            "set"
        )
    }

    async fn remove_set(&self, id: ProgrammeExerciseID, set_no: u32) -> Result<u32, DeleteError> {
        log_on_error!(
            self.repository.delete_set(id, set_no),
            DeleteError,
            "remove",
            "set"
        )
    }
}

//! REST storage.
//!
//! The platform API is the authoritative data source. All repository traits
//! are implemented against it; the transport is pluggable via [`SendRequest`].

use fitdesk_domain as domain;
use gloo_net::http::{Request, Response};
use serde_json::{Map, json};

use crate::dto;

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, domain::StorageError>;
}

#[derive(Clone)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, domain::StorageError> {
        request
            .send()
            .await
            .map_err(|_| domain::StorageError::NoConnection)
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    send_request: S,
}

impl REST<GlooNetSendRequest> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            send_request: GlooNetSendRequest,
        }
    }
}

impl Default for REST<GlooNetSendRequest> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SendRequest> REST<S> {
    pub const fn with_transport(send_request: S) -> Self {
        Self { send_request }
    }

    async fn get(&self, url: &str) -> Result<Response, domain::StorageError> {
        self.send(Request::get(url).build().map_err(request_error)?)
            .await
    }

    async fn post<B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Response, domain::StorageError> {
        self.send(Request::post(url).json(body).map_err(request_error)?)
            .await
    }

    async fn post_empty(&self, url: &str) -> Result<Response, domain::StorageError> {
        self.send(Request::post(url).build().map_err(request_error)?)
            .await
    }

    async fn put<B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Response, domain::StorageError> {
        self.send(Request::put(url).json(body).map_err(request_error)?)
            .await
    }

    async fn patch<B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Response, domain::StorageError> {
        self.send(Request::patch(url).json(body).map_err(request_error)?)
            .await
    }

    async fn delete(&self, url: &str) -> Result<Response, domain::StorageError> {
        self.send(Request::delete(url).build().map_err(request_error)?)
            .await
    }

    async fn send(&self, request: Request) -> Result<Response, domain::StorageError> {
        let response = self.send_request.send_request(request).await?;
        match response.status() {
            200..=299 => Ok(response),
            401 => Err(domain::StorageError::NoSession),
            status => Err(domain::StorageError::Other(
                format!("unexpected response status: {status}").into(),
            )),
        }
    }
}

fn request_error(err: gloo_net::Error) -> domain::StorageError {
    domain::StorageError::Other(err.to_string().into())
}

async fn json<T: serde::de::DeserializeOwned>(
    response: Response,
) -> Result<T, domain::StorageError> {
    response
        .json()
        .await
        .map_err(|err| domain::StorageError::Other(err.to_string().into()))
}

impl<S: SendRequest> domain::ExerciseRepository for REST<S> {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        let exercises: Vec<dto::Exercise> = json(self.get("api/exercises").await?).await?;
        exercises
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err: dto::DecodeError| domain::ReadError::Other(err.into()))
    }

    async fn create_exercise(
        &self,
        title: domain::Name,
        image: Option<String>,
        level: domain::Level,
    ) -> Result<domain::Exercise, domain::CreateError> {
        let exercise: dto::Exercise = json(
            self.post(
                "api/exercises",
                &json!({
                    "title": title.to_string(),
                    "image": image,
                    "level": level as u8,
                }),
            )
            .await?,
        )
        .await?;
        exercise
            .try_into()
            .map_err(|err: dto::DecodeError| domain::CreateError::Other(err.into()))
    }

    async fn replace_exercise(
        &self,
        exercise: domain::Exercise,
    ) -> Result<domain::Exercise, domain::UpdateError> {
        let exercise: dto::Exercise = json(
            self.put(
                &format!("api/exercises/{}", *exercise.id),
                &dto::Exercise::from(&exercise),
            )
            .await?,
        )
        .await?;
        exercise
            .try_into()
            .map_err(|err: dto::DecodeError| domain::UpdateError::Other(err.into()))
    }

    async fn delete_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::ExerciseID, domain::DeleteError> {
        self.delete(&format!("api/exercises/{}", *id)).await?;
        Ok(id)
    }
}

impl<S: SendRequest> domain::ProgrammeRepository for REST<S> {
    async fn read_programmes(&self) -> Result<Vec<domain::Programme>, domain::ReadError> {
        let programmes: Vec<dto::Programme> = json(self.get("api/programmes").await?).await?;
        programmes
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err: dto::DecodeError| domain::ReadError::Other(err.into()))
    }

    async fn create_programme(
        &self,
        name: domain::Name,
        description: String,
    ) -> Result<domain::Programme, domain::CreateError> {
        let programme: dto::Programme = json(
            self.post(
                "api/programmes",
                &json!({
                    "name": name.to_string(),
                    "description": description,
                    "archived": false,
                }),
            )
            .await?,
        )
        .await?;
        programme
            .try_into()
            .map_err(|err: dto::DecodeError| domain::CreateError::Other(err.into()))
    }

    async fn modify_programme(
        &self,
        id: domain::ProgrammeID,
        name: Option<domain::Name>,
        description: Option<String>,
        archived: Option<bool>,
    ) -> Result<domain::Programme, domain::UpdateError> {
        let mut content = Map::new();
        if let Some(name) = name {
            content.insert("name".into(), json!(name.to_string()));
        }
        if let Some(description) = description {
            content.insert("description".into(), json!(description));
        }
        if let Some(archived) = archived {
            content.insert("archived".into(), json!(archived));
        }
        let programme: dto::Programme = json(
            self.patch(&format!("api/programmes/{}", *id), &content)
                .await?,
        )
        .await?;
        programme
            .try_into()
            .map_err(|err: dto::DecodeError| domain::UpdateError::Other(err.into()))
    }

    async fn delete_programme(
        &self,
        id: domain::ProgrammeID,
    ) -> Result<domain::ProgrammeID, domain::DeleteError> {
        self.delete(&format!("api/programmes/{}", *id)).await?;
        Ok(id)
    }

    async fn create_day(
        &self,
        programme_id: domain::ProgrammeID,
        name: domain::Name,
    ) -> Result<domain::ProgrammeDay, domain::CreateError> {
        let day: dto::ProgrammeDay = json(
            self.post(
                &format!("api/programmes/{}/days", *programme_id),
                &json!({ "name": name.to_string() }),
            )
            .await?,
        )
        .await?;
        day.try_into()
            .map_err(|err: dto::DecodeError| domain::CreateError::Other(err.into()))
    }

    async fn delete_day(&self, id: domain::DayID) -> Result<domain::DayID, domain::DeleteError> {
        self.delete(&format!("api/days/{}", *id)).await?;
        Ok(id)
    }
}

impl<S: SendRequest> domain::DayExerciseRepository for REST<S> {
    async fn read_day_exercises(
        &self,
        day_id: domain::DayID,
    ) -> Result<Vec<domain::ProgrammeExercise>, domain::ReadError> {
        let records: Vec<dto::ProgrammeExercise> =
            json(self.get(&format!("api/days/{}/exercises", *day_id)).await?).await?;
        records
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err: dto::DecodeError| domain::ReadError::Other(err.into()))
    }

    async fn create_set(
        &self,
        id: domain::ProgrammeExerciseID,
        set: domain::ExerciseSet,
    ) -> Result<domain::ProgrammeExercise, domain::CreateError> {
        let record: dto::ProgrammeExercise = json(
            self.post(
                &format!("api/programme_exercises/{}/sets", *id),
                &dto::ExerciseSet::from(&set),
            )
            .await?,
        )
        .await?;
        record
            .try_into()
            .map_err(|err: dto::DecodeError| domain::CreateError::Other(err.into()))
    }

    async fn duplicate_set(
        &self,
        id: domain::ProgrammeExerciseID,
        set_no: u32,
    ) -> Result<domain::ProgrammeExercise, domain::CreateError> {
        let record: dto::ProgrammeExercise = json(
            self.post_empty(&format!(
                "api/programme_exercises/{}/sets/{set_no}/duplicate",
                *id
            ))
            .await?,
        )
        .await?;
        record
            .try_into()
            .map_err(|err: dto::DecodeError| domain::CreateError::Other(err.into()))
    }

    async fn delete_set(
        &self,
        id: domain::ProgrammeExerciseID,
        set_no: u32,
    ) -> Result<u32, domain::DeleteError> {
        self.delete(&format!("api/programme_exercises/{}/sets/{set_no}", *id))
            .await?;
        Ok(set_no)
    }
}

use super::users::User;
use super::{
    DifficultyLevel, InteractionKind, Message, PersonalKind, ValidationError, null_as_default,
    timestamp,
};
use crate::macros::setter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};
use uuid::Uuid;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub difficulty_level: DifficultyLevel,
    #[serde(default = "default_public")]
    pub is_public: bool,
    pub creator_id: Option<Uuid>,
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub favorite_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub save_count: u32,
    #[serde(default)]
    pub user_rating: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_favorited: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_saved: bool,
}

fn default_public() -> bool {
    true
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("exercise name must not be empty"));
    }
    Ok(())
}

// Requests

#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct ListExercises {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    difficulty_level: Option<DifficultyLevel>,
    #[serde(skip_serializing_if = "is_false")]
    sort_by_difficulty: bool,
}

impl ListExercises {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt name: String);
    setter!(opt description: String);
    setter!(opt difficulty_level: DifficultyLevel);
    setter!(sort_by_difficulty: bool);

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Request for ListExercises {
    type Data = Self;
    type Response = Vec<Exercise>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/exercises".into()
    }

    fn data(&self) -> RequestData<&Self> {
        if self.is_empty() {
            RequestData::Empty
        } else {
            RequestData::Query(self)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetExercise {
    exercise_id: Uuid,
}

impl GetExercise {
    pub fn new(exercise_id: Uuid) -> Self {
        Self { exercise_id }
    }
}

impl Request for GetExercise {
    type Data = ();
    type Response = Exercise;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/exercises/{}", self.exercise_id).into()
    }
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListPersonalExercises {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<PersonalKind>,
}

impl ListPersonalExercises {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt kind: PersonalKind);
}

impl Request for ListPersonalExercises {
    type Data = Self;
    type Response = Vec<Exercise>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/exercises/personal".into()
    }

    fn data(&self) -> RequestData<&Self> {
        match self.kind {
            Some(_) => RequestData::Query(self),
            None => RequestData::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateExercise {
    name: String,
    description: String,
    difficulty_level: DifficultyLevel,
    is_public: bool,
}

impl CreateExercise {
    pub fn new(name: impl Into<String>, difficulty_level: DifficultyLevel) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            difficulty_level,
            is_public: true,
        }
    }

    setter!(description: String);
    setter!(is_public: bool);

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }
}

impl Request for CreateExercise {
    type Data = Self;
    type Response = Exercise;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/exercises".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateExercise {
    #[serde(skip)]
    exercise_id: Uuid,
    #[serde(flatten)]
    changes: ExerciseChanges,
}

impl UpdateExercise {
    pub fn new(exercise_id: Uuid) -> Self {
        Self {
            exercise_id,
            changes: ExerciseChanges::default(),
        }
    }

    setter!(opt changes.name: String);
    setter!(opt changes.description: String);
    setter!(opt changes.difficulty_level: DifficultyLevel);
    setter!(opt changes.is_public: bool);

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.changes.is_empty() {
            return Err(ValidationError::new("no changes given for exercise update"));
        }
        if let Some(ref name) = self.changes.name {
            validate_name(name)?;
        }
        Ok(())
    }
}

impl Request for UpdateExercise {
    type Data = Self;
    type Response = Exercise;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/exercises/{}", self.exercise_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

/// Partial update; unset fields are left out of the body entirely.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<DifficultyLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl ExerciseChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteExercise {
    exercise_id: Uuid,
}

impl DeleteExercise {
    pub fn new(exercise_id: Uuid) -> Self {
        Self { exercise_id }
    }
}

impl Request for DeleteExercise {
    type Data = ();
    type Response = Message;
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/exercises/{}", self.exercise_id).into()
    }
}

// Favorites and saves share a shape; only the method and path segment differ.
macro_rules! interaction_request {
    ($name:ident, $method:ident, $segment:literal) => {
        #[derive(Debug, Clone, Serialize)]
        pub struct $name {
            exercise_id: Uuid,
        }

        impl $name {
            pub fn new(exercise_id: Uuid) -> Self {
                Self { exercise_id }
            }
        }

        impl Request for $name {
            type Data = ();
            type Response = Exercise;
            const METHOD: Method = Method::$method;

            fn endpoint(&self) -> Cow<'_, str> {
                format!("/exercises/{}/{}", self.exercise_id, $segment).into()
            }
        }
    };
}

interaction_request!(FavoriteExercise, POST, "favorite");
interaction_request!(UnfavoriteExercise, DELETE, "favorite");
interaction_request!(SaveExercise, POST, "save");
interaction_request!(UnsaveExercise, DELETE, "save");

#[derive(Debug, Clone, Serialize)]
pub struct ListInteractions {
    #[serde(skip)]
    exercise_id: Uuid,
    interaction_type: InteractionKind,
}

impl ListInteractions {
    pub fn new(exercise_id: Uuid, interaction_type: InteractionKind) -> Self {
        Self {
            exercise_id,
            interaction_type,
        }
    }
}

impl Request for ListInteractions {
    type Data = Self;
    type Response = Vec<User>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/exercises/{}/interactions", self.exercise_id).into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

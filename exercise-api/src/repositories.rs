use crate::endpoints::{
    DifficultyLevel, InteractionKind, RatingValue,
    exercises::{
        CreateExercise, DeleteExercise, FavoriteExercise, GetExercise, ListExercises,
        ListInteractions, ListPersonalExercises, SaveExercise, UnfavoriteExercise, UnsaveExercise,
        UpdateExercise,
    },
    ratings::{ListRatings, RateExercise},
    users::{ListUserExercises, ListUsers},
};
use uuid::Uuid;

pub struct ExerciseRepository;

impl ExerciseRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListExercises {
        ListExercises::new()
    }

    pub fn get(&self, exercise_id: Uuid) -> GetExercise {
        GetExercise::new(exercise_id)
    }

    pub fn personal(&self) -> ListPersonalExercises {
        ListPersonalExercises::new()
    }

    pub fn create(
        &self,
        name: impl Into<String>,
        difficulty_level: DifficultyLevel,
    ) -> CreateExercise {
        CreateExercise::new(name, difficulty_level)
    }

    pub fn update(&self, exercise_id: Uuid) -> UpdateExercise {
        UpdateExercise::new(exercise_id)
    }

    pub fn delete(&self, exercise_id: Uuid) -> DeleteExercise {
        DeleteExercise::new(exercise_id)
    }

    pub fn favorite(&self, exercise_id: Uuid) -> FavoriteExercise {
        FavoriteExercise::new(exercise_id)
    }

    pub fn unfavorite(&self, exercise_id: Uuid) -> UnfavoriteExercise {
        UnfavoriteExercise::new(exercise_id)
    }

    pub fn save(&self, exercise_id: Uuid) -> SaveExercise {
        SaveExercise::new(exercise_id)
    }

    pub fn unsave(&self, exercise_id: Uuid) -> UnsaveExercise {
        UnsaveExercise::new(exercise_id)
    }

    pub fn interactions(&self, exercise_id: Uuid, kind: InteractionKind) -> ListInteractions {
        ListInteractions::new(exercise_id, kind)
    }
}

pub struct RatingRepository;

impl RatingRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn rate(&self, exercise_id: Uuid, value: RatingValue) -> RateExercise {
        RateExercise::new(exercise_id, value)
    }

    pub fn list(&self, exercise_id: Uuid) -> ListRatings {
        ListRatings::new(exercise_id)
    }
}

pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListUsers {
        ListUsers
    }

    pub fn exercises(&self, user_id: Uuid) -> ListUserExercises {
        ListUserExercises::new(user_id)
    }
}

use crate::error::ClientError;
use crate::session::SessionManager;
use exercise_api::{
    endpoints::{
        exercises::{CreateExercise, Exercise, ListExercises, UpdateExercise},
        ratings::Rating,
        users::User,
        InteractionKind, Message, PersonalKind, RatingValue,
    },
    HttpTransport, Request, Transport,
};
use std::sync::Arc;
use uuid::Uuid;

/// Exercise operations, all routed through the session's authorized path.
///
/// Results are the server's view after the call; nothing is patched locally.
pub struct ExerciseClient<T = HttpTransport> {
    session: Arc<SessionManager<T>>,
}

impl<T: Transport> ExerciseClient<T> {
    pub fn new(session: Arc<SessionManager<T>>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &SessionManager<T> {
        &self.session
    }

    pub async fn list(&self, query: ListExercises) -> Result<Vec<Exercise>, ClientError> {
        let exercises = self.session.authorized_request(query).await?;
        tracing::debug!("Fetched {} exercises", exercises.len());
        Ok(exercises)
    }

    /// Exercises created by the logged-in user, private ones included.
    pub async fn mine(&self) -> Result<Vec<Exercise>, ClientError> {
        let user_id = self.current_user_id().await?;
        self.session
            .authorized_request(Request::users().exercises(user_id))
            .await
    }

    pub async fn get(&self, exercise_id: Uuid) -> Result<Exercise, ClientError> {
        self.session
            .authorized_request(Request::exercises().get(exercise_id))
            .await
    }

    /// Favorites, saved, or both when `kind` is `None`.
    pub async fn personal(&self, kind: Option<PersonalKind>) -> Result<Vec<Exercise>, ClientError> {
        let mut req = Request::exercises().personal();
        if let Some(kind) = kind {
            req = req.kind(kind);
        }
        self.session.authorized_request(req).await
    }

    pub async fn create(&self, exercise: CreateExercise) -> Result<Exercise, ClientError> {
        exercise.validate()?;
        let created = self.session.authorized_request(exercise).await?;
        tracing::info!("Created exercise {}", created.id);
        Ok(created)
    }

    pub async fn update(&self, update: UpdateExercise) -> Result<Exercise, ClientError> {
        update.validate()?;
        let updated = self.session.authorized_request(update).await?;
        tracing::info!("Updated exercise {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, exercise_id: Uuid) -> Result<Message, ClientError> {
        let message = self
            .session
            .authorized_request(Request::exercises().delete(exercise_id))
            .await?;
        tracing::info!("Deleted exercise {}", exercise_id);
        Ok(message)
    }

    pub async fn favorite(&self, exercise_id: Uuid) -> Result<Exercise, ClientError> {
        self.session
            .authorized_request(Request::exercises().favorite(exercise_id))
            .await
    }

    pub async fn unfavorite(&self, exercise_id: Uuid) -> Result<Exercise, ClientError> {
        self.session
            .authorized_request(Request::exercises().unfavorite(exercise_id))
            .await
    }

    pub async fn save(&self, exercise_id: Uuid) -> Result<Exercise, ClientError> {
        self.session
            .authorized_request(Request::exercises().save(exercise_id))
            .await
    }

    pub async fn unsave(&self, exercise_id: Uuid) -> Result<Exercise, ClientError> {
        self.session
            .authorized_request(Request::exercises().unsave(exercise_id))
            .await
    }

    pub async fn rate(&self, exercise_id: Uuid, value: u8) -> Result<Rating, ClientError> {
        let value = RatingValue::new(value)?;
        self.session
            .authorized_request(Request::ratings().rate(exercise_id, value))
            .await
    }

    pub async fn ratings(&self, exercise_id: Uuid) -> Result<Vec<Rating>, ClientError> {
        self.session
            .authorized_request(Request::ratings().list(exercise_id))
            .await
    }

    pub async fn interactions(
        &self,
        exercise_id: Uuid,
        kind: InteractionKind,
    ) -> Result<Vec<User>, ClientError> {
        self.session
            .authorized_request(Request::exercises().interactions(exercise_id, kind))
            .await
    }

    /// The `sub` claim is either the user id itself or a username that has to
    /// be looked up.
    async fn current_user_id(&self) -> Result<Uuid, ClientError> {
        let subject = self
            .session
            .current_user()
            .and_then(|claims| claims.sub)
            .ok_or(ClientError::Unauthenticated)?;

        if let Ok(id) = Uuid::parse_str(&subject) {
            return Ok(id);
        }

        let users = self
            .session
            .authorized_request(Request::users().list())
            .await?;
        users
            .into_iter()
            .find(|user| user.username == subject)
            .map(|user| user.id)
            .ok_or_else(|| ClientError::Upstream {
                status: 404,
                message: format!("User '{}' not found", subject),
            })
    }
}

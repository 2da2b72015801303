use super::exercises::Exercise;
use super::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::Request;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListUsers;

impl Request for ListUsers {
    type Data = ();
    type Response = Vec<User>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/users".into()
    }
}

/// Exercises created by one user, public or not.
#[derive(Debug, Clone, Serialize)]
pub struct ListUserExercises {
    #[serde(skip)]
    user_id: Uuid,
}

impl ListUserExercises {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

impl Request for ListUserExercises {
    type Data = ();
    type Response = Vec<Exercise>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/users/{}/exercises", self.user_id).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let id = Uuid::nil();
        assert_eq!(ListUsers.endpoint(), "/users");
        assert_eq!(
            ListUserExercises::new(id).endpoint(),
            format!("/users/{}/exercises", id)
        );
    }

    #[test]
    fn test_user_with_naive_timestamp() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "username": "alice",
            "created_at": "2024-05-01T12:30:00",
            "updated_at": null
        }))
        .unwrap();
        assert_eq!(user.username, "alice");
        assert!(user.created_at.is_some());
        assert!(user.updated_at.is_none());
    }
}

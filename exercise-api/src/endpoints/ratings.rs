use super::{RatingValue, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};
use uuid::Uuid;

// Common

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub id: Uuid,
    pub value: RatingValue,
    pub exercise_id: Uuid,
    pub user_id: Uuid,
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

// Requests

/// Rates an exercise; rating again replaces the caller's previous value.
#[derive(Debug, Clone, Serialize)]
pub struct RateExercise {
    #[serde(skip)]
    exercise_id: Uuid,
    value: RatingValue,
}

impl RateExercise {
    pub fn new(exercise_id: Uuid, value: RatingValue) -> Self {
        Self { exercise_id, value }
    }
}

impl Request for RateExercise {
    type Data = Self;
    type Response = Rating;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/exercises/{}/rate", self.exercise_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListRatings {
    exercise_id: Uuid,
}

impl ListRatings {
    pub fn new(exercise_id: Uuid) -> Self {
        Self { exercise_id }
    }
}

impl Request for ListRatings {
    type Data = ();
    type Response = Vec<Rating>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/exercises/{}/ratings", self.exercise_id).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rate_body() {
        let id = Uuid::new_v4();
        let rate = RateExercise::new(id, RatingValue::new(4).unwrap());
        assert_eq!(serde_json::to_value(&rate).unwrap(), json!({"value": 4}));
        assert_eq!(rate.endpoint(), format!("/exercises/{}/rate", id));
    }

    #[test]
    fn test_rating_response() {
        let rating: Rating = serde_json::from_value(json!({
            "id": "9b2e8f7e-2a0f-4c55-9a1c-5d3e1f0a6b21",
            "value": 5,
            "exercise_id": "5f0c3a3e-8a4b-4d8e-9a38-0c6c2d1f7b11",
            "user_id": "0b6d1c55-7a36-4bd4-8f0e-4a5f5d1e2c33",
            "created_at": "2024-03-01T12:30:00.123456",
            "updated_at": null
        }))
        .unwrap();
        assert_eq!(rating.value.inner(), 5);
        assert!(rating.created_at.is_some());
    }
}

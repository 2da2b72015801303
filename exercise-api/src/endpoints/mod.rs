pub mod exercises;
pub mod ratings;
pub mod users;

use crate::macros::one_to_five;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;

one_to_five!(
    /// Exercise difficulty, 1 (easiest) through 5.
    DifficultyLevel,
    "difficulty level"
);

one_to_five!(
    /// A user's rating of an exercise, 1 through 5.
    RatingValue,
    "rating"
);

/// Input rejected on the client before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ValidationError {}

/// Plain acknowledgement body, e.g. `{"message": "Exercise deleted"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

/// Which personal collection to read. `None` on the request means both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalKind {
    Favorites,
    Saved,
}

/// Interaction collections as named by the interactions endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Favorites,
    Saves,
}

impl Display for PersonalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Favorites => f.write_str("favorites"),
            Self::Saved => f.write_str("saved"),
        }
    }
}

impl FromStr for PersonalKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "favorites" | "favorite" => Ok(Self::Favorites),
            "saved" | "save" => Ok(Self::Saved),
            _ => Err(ValidationError::new(format!(
                "unknown collection '{}': expected 'favorites' or 'saved'",
                s
            ))),
        }
    }
}

impl Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Favorites => f.write_str("favorites"),
            Self::Saves => f.write_str("saves"),
        }
    }
}

impl FromStr for InteractionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "favorites" | "favorite" => Ok(Self::Favorites),
            "saves" | "save" | "saved" => Ok(Self::Saves),
            _ => Err(ValidationError::new(format!(
                "unknown interaction type '{}': expected 'favorites' or 'saves'",
                s
            ))),
        }
    }
}

/// Treats an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Backend timestamps come either timezone-aware or naive; naive ones are UTC.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, de};

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc())
            })
    }

    pub mod option {
        use super::*;

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw).map(Some).map_err(de::Error::custom),
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_difficulty_bounds() {
        assert!(DifficultyLevel::new(0).is_err());
        assert_eq!(DifficultyLevel::new(1).unwrap().inner(), 1);
        assert_eq!(DifficultyLevel::new(5).unwrap().inner(), 5);
        assert!(DifficultyLevel::new(6).is_err());
    }

    #[test]
    fn test_difficulty_rejects_out_of_range_json() {
        let err = serde_json::from_str::<DifficultyLevel>("9").unwrap_err();
        assert!(err.to_string().contains("between 1 and 5"));
    }

    #[test]
    fn test_rating_from_str() {
        assert_eq!("4".parse::<RatingValue>().unwrap().inner(), 4);
        assert!("four".parse::<RatingValue>().is_err());
        assert!("0".parse::<RatingValue>().is_err());
    }

    #[test]
    fn test_timestamp_accepts_naive_and_aware() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(timestamp::parse("2024-03-01T12:30:00").unwrap(), expected);
        assert_eq!(timestamp::parse("2024-03-01T12:30:00Z").unwrap(), expected);
        assert_eq!(
            timestamp::parse("2024-03-01T14:30:00+02:00").unwrap(),
            expected
        );
        assert!(timestamp::parse("2024-03-01T12:30:00.250000").is_ok());
        assert!(timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(
            "Favorites".parse::<PersonalKind>().unwrap(),
            PersonalKind::Favorites
        );
        assert_eq!("saved".parse::<PersonalKind>().unwrap(), PersonalKind::Saved);
        assert_eq!(
            "saved".parse::<InteractionKind>().unwrap(),
            InteractionKind::Saves
        );
        assert!("likes".parse::<InteractionKind>().is_err());
    }
}

//! Plain-text formatting of backend records.

use chrono::{DateTime, Local, Utc};
use exercise_api::endpoints::{exercises::Exercise, ratings::Rating, users::User};
use exercise_auth::Claims;
use std::fmt::Write;

pub fn fmt_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// `###..` style bar for a 1-5 level.
fn level_bar(level: u8) -> String {
    (1..=5).map(|i| if i <= level { '#' } else { '.' }).collect()
}

fn markers(exercise: &Exercise) -> String {
    let mut markers = Vec::new();
    if exercise.is_favorited {
        markers.push("favorite");
    }
    if exercise.is_saved {
        markers.push("saved");
    }
    if !exercise.is_public {
        markers.push("private");
    }
    if markers.is_empty() {
        String::new()
    } else {
        format!(" [{}]", markers.join(", "))
    }
}

pub fn exercise_list(exercises: &[Exercise]) -> String {
    if exercises.is_empty() {
        return "No exercises found.".to_string();
    }

    let name_width = exercises
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for exercise in exercises {
        let _ = writeln!(
            out,
            "{}  {:<width$}  {}  fav {:>3}  saved {:>3}{}",
            exercise.id,
            exercise.name,
            level_bar(exercise.difficulty_level.inner()),
            exercise.favorite_count,
            exercise.save_count,
            markers(exercise),
            width = name_width,
        );
    }
    out.trim_end().to_string()
}

pub fn exercise_detail(exercise: &Exercise) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}{}", exercise.name, markers(exercise));
    let _ = writeln!(out, "  id:          {}", exercise.id);
    if !exercise.description.is_empty() {
        let _ = writeln!(out, "  description: {}", exercise.description);
    }
    let _ = writeln!(
        out,
        "  difficulty:  {} ({}/5)",
        level_bar(exercise.difficulty_level.inner()),
        exercise.difficulty_level
    );
    let _ = writeln!(out, "  favorites:   {}", exercise.favorite_count);
    let _ = writeln!(out, "  saves:       {}", exercise.save_count);
    if let Some(rating) = exercise.user_rating {
        let _ = writeln!(out, "  rating:      {:.1}", rating);
    }
    if let Some(creator) = exercise.creator_id {
        let _ = writeln!(out, "  creator:     {}", creator);
    }
    let _ = writeln!(out, "  created:     {}", fmt_timestamp(exercise.created_at));
    let _ = write!(out, "  updated:     {}", fmt_timestamp(exercise.updated_at));
    out
}

pub fn rating_detail(rating: &Rating) -> String {
    format!(
        "Rated {}/5 (exercise {}, rating {})",
        rating.value, rating.exercise_id, rating.id
    )
}

pub fn rating_list(ratings: &[Rating]) -> String {
    if ratings.is_empty() {
        return "No ratings yet.".to_string();
    }

    let mut out = String::new();
    for rating in ratings {
        let _ = writeln!(
            out,
            "{}/5  by {}  {}",
            rating.value,
            rating.user_id,
            fmt_timestamp(rating.updated_at.or(rating.created_at))
        );
    }
    let average = ratings
        .iter()
        .map(|r| f64::from(r.value.inner()))
        .sum::<f64>()
        / ratings.len() as f64;
    let _ = write!(out, "average {:.1} over {} ratings", average, ratings.len());
    out
}

pub fn user_list(users: &[User]) -> String {
    if users.is_empty() {
        return "No users.".to_string();
    }
    users
        .iter()
        .map(|user| format!("{}  {}", user.id, user.username))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn whoami(claims: Option<&Claims>) -> String {
    let Some(claims) = claims else {
        return "Logged in (token does not carry readable claims)".to_string();
    };

    let mut out = format!("Logged in as {}", claims.subject().unwrap_or("<unknown>"));
    if let Some(expires) = claims.expires_at() {
        let state = if claims.is_expired() {
            "expired"
        } else {
            "expires"
        };
        let _ = write!(out, " (access token {} {})", state, fmt_timestamp(Some(expires)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use exercise_api::endpoints::{DifficultyLevel, RatingValue};
    use uuid::Uuid;

    fn exercise(name: &str, level: u8) -> Exercise {
        Exercise {
            id: Uuid::nil(),
            name: name.to_string(),
            description: String::new(),
            difficulty_level: DifficultyLevel::new(level).unwrap(),
            is_public: true,
            creator_id: None,
            created_at: None,
            updated_at: None,
            favorite_count: 2,
            save_count: 0,
            user_rating: None,
            is_favorited: false,
            is_saved: false,
        }
    }

    #[test]
    fn test_level_bar() {
        assert_eq!(level_bar(1), "#....");
        assert_eq!(level_bar(5), "#####");
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(exercise_list(&[]), "No exercises found.");
        assert_eq!(rating_list(&[]), "No ratings yet.");
        assert_eq!(user_list(&[]), "No users.");
    }

    #[test]
    fn test_exercise_list_aligns_names() {
        let out = exercise_list(&[exercise("Squat", 3), exercise("Deadlift", 4)]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Squat     ###.."));
        assert!(lines[1].contains("Deadlift  ####."));
    }

    #[test]
    fn test_markers() {
        let mut e = exercise("Plank", 2);
        assert_eq!(markers(&e), "");
        e.is_favorited = true;
        e.is_public = false;
        assert_eq!(markers(&e), " [favorite, private]");
    }

    #[test]
    fn test_detail_skips_empty_description() {
        let out = exercise_detail(&exercise("Plank", 2));
        assert!(out.starts_with("Plank\n"));
        assert!(!out.contains("description"));
        assert!(out.contains("difficulty:  ##... (2/5)"));
        assert!(out.contains("created:     -"));
    }

    #[test]
    fn test_rating_average() {
        let rating = |value| Rating {
            id: Uuid::nil(),
            value: RatingValue::new(value).unwrap(),
            exercise_id: Uuid::nil(),
            user_id: Uuid::nil(),
            created_at: None,
            updated_at: None,
        };
        let out = rating_list(&[rating(4), rating(5)]);
        assert!(out.ends_with("average 4.5 over 2 ratings"));
    }

    #[test]
    fn test_whoami_without_claims() {
        assert!(whoami(None).starts_with("Logged in"));
        let claims = Claims {
            sub: Some("alice".to_string()),
            exp: None,
        };
        assert_eq!(whoami(Some(&claims)), "Logged in as alice");
    }
}

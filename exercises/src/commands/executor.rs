use super::{render, Command, CredentialArgs, FilterArgs};
use crate::client::ExerciseClient;
use anyhow::Result;
use exercise_api::{
    endpoints::exercises::{ListExercises, UpdateExercise},
    Request, Transport,
};
use secrecy::SecretString;
use serde::Serialize;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }

    fn render<V>(self, value: &V, text: impl FnOnce(&V) -> String) -> Result<String>
    where
        V: Serialize + ?Sized,
    {
        match self {
            Self::Json => Ok(serde_json::to_string_pretty(value)?),
            Self::Text => Ok(text(value)),
        }
    }
}

/// Runs one command and returns what should be printed.
///
/// Mutations print the record the server sent back, never a locally edited copy.
pub async fn execute_command<T: Transport>(
    command: Command,
    client: &ExerciseClient<T>,
    format: OutputFormat,
) -> Result<String> {
    tracing::debug!(
        "Executing {} (mutation: {})",
        command_name(&command),
        command.is_mutation()
    );

    let output = match command {
        Command::Register(args) => {
            let password = resolve_password(&args, true)?;
            let user = client.session().register(&args.username, &password).await?;
            format.render(&user, |u| {
                format!("Registered {} ({}). You can now log in.", u.username, u.id)
            })?
        }

        Command::Login(args) => {
            let password = resolve_password(&args, false)?;
            client.session().login(&args.username, &password).await?;
            match format {
                OutputFormat::Json => {
                    serde_json::json!({ "username": args.username }).to_string()
                }
                OutputFormat::Text => format!("Logged in as {}", args.username),
            }
        }

        Command::Logout => {
            client.session().logout()?;
            "Logged out".to_string()
        }

        Command::Whoami => {
            if !client.session().is_active() {
                return Err(crate::ClientError::Unauthenticated.into());
            }
            let claims = client.session().current_user();
            match format {
                OutputFormat::Json => serde_json::json!({
                    "username": claims.as_ref().and_then(|c| c.sub.clone()),
                    "expires_at": claims.as_ref().and_then(|c| c.expires_at()),
                })
                .to_string(),
                OutputFormat::Text => render::whoami(claims.as_ref()),
            }
        }

        Command::List(filters) => {
            let exercises = client.list(list_query(filters)).await?;
            format.render(exercises.as_slice(), render::exercise_list)?
        }

        Command::Mine => {
            let exercises = client.mine().await?;
            format.render(exercises.as_slice(), render::exercise_list)?
        }

        Command::Show { id } => {
            let exercise = client.get(id).await?;
            format.render(&exercise, render::exercise_detail)?
        }

        Command::Personal { kind } => {
            let exercises = client.personal(kind).await?;
            format.render(exercises.as_slice(), render::exercise_list)?
        }

        Command::Create {
            name,
            description,
            difficulty,
            private,
        } => {
            let request = Request::exercises()
                .create(name, difficulty)
                .description(description)
                .is_public(!private);
            let exercise = client.create(request).await?;
            format.render(&exercise, render::exercise_detail)?
        }

        Command::Update {
            id,
            name,
            description,
            difficulty,
            public,
        } => {
            let request = update_request(id, name, description, difficulty, public);
            let exercise = client.update(request).await?;
            format.render(&exercise, render::exercise_detail)?
        }

        Command::Delete { id } => {
            let message = client.delete(id).await?;
            format.render(&message, |m| m.message.clone())?
        }

        Command::Favorite { id } => {
            let exercise = client.favorite(id).await?;
            format.render(&exercise, render::exercise_detail)?
        }

        Command::Unfavorite { id } => {
            let exercise = client.unfavorite(id).await?;
            format.render(&exercise, render::exercise_detail)?
        }

        Command::Save { id } => {
            let exercise = client.save(id).await?;
            format.render(&exercise, render::exercise_detail)?
        }

        Command::Unsave { id } => {
            let exercise = client.unsave(id).await?;
            format.render(&exercise, render::exercise_detail)?
        }

        Command::Rate { id, value } => {
            let rating = client.rate(id, value).await?;
            format.render(&rating, render::rating_detail)?
        }

        Command::Ratings { id } => {
            let ratings = client.ratings(id).await?;
            format.render(ratings.as_slice(), render::rating_list)?
        }

        Command::Interactions { id, kind } => {
            let users = client.interactions(id, kind).await?;
            format.render(users.as_slice(), render::user_list)?
        }
    };

    Ok(output)
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Register(_) => "register",
        Command::Login(_) => "login",
        Command::Logout => "logout",
        Command::Whoami => "whoami",
        Command::List(_) => "list",
        Command::Mine => "mine",
        Command::Show { .. } => "show",
        Command::Personal { .. } => "personal",
        Command::Create { .. } => "create",
        Command::Update { .. } => "update",
        Command::Delete { .. } => "delete",
        Command::Favorite { .. } => "favorite",
        Command::Unfavorite { .. } => "unfavorite",
        Command::Save { .. } => "save",
        Command::Unsave { .. } => "unsave",
        Command::Rate { .. } => "rate",
        Command::Ratings { .. } => "ratings",
        Command::Interactions { .. } => "interactions",
    }
}

pub fn list_query(filters: FilterArgs) -> ListExercises {
    let mut query = Request::exercises()
        .list()
        .sort_by_difficulty(filters.sort);
    if let Some(name) = filters.name {
        query = query.name(name);
    }
    if let Some(description) = filters.description {
        query = query.description(description);
    }
    if let Some(level) = filters.difficulty {
        query = query.difficulty_level(level);
    }
    query
}

fn update_request(
    id: uuid::Uuid,
    name: Option<String>,
    description: Option<String>,
    difficulty: Option<exercise_api::endpoints::DifficultyLevel>,
    public: Option<bool>,
) -> UpdateExercise {
    let mut request = Request::exercises().update(id);
    if let Some(name) = name {
        request = request.name(name);
    }
    if let Some(description) = description {
        request = request.description(description);
    }
    if let Some(level) = difficulty {
        request = request.difficulty_level(level);
    }
    if let Some(public) = public {
        request = request.is_public(public);
    }
    request
}

/// Uses `--password` / `EXERCISES_PASSWORD` when given, otherwise prompts.
fn resolve_password(args: &CredentialArgs, confirm: bool) -> Result<SecretString> {
    if let Some(ref password) = args.password {
        return Ok(SecretString::from(password.clone()));
    }

    let mut prompt =
        dialoguer::Password::new().with_prompt(format!("Password for {}", args.username));
    if confirm {
        prompt = prompt.with_confirmation("Repeat password", "Passwords do not match");
    }
    Ok(SecretString::from(prompt.interact()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use exercise_api::endpoints::DifficultyLevel;
    use exercise_api::ApiRequest;
    use secrecy::ExposeSecret;

    #[test]
    fn test_list_query_only_sets_given_filters() {
        let query = list_query(FilterArgs {
            name: Some("row".to_string()),
            ..Default::default()
        });
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({ "name": "row" })
        );
    }

    #[test]
    fn test_update_request_body() {
        let id = uuid::Uuid::nil();
        let level = DifficultyLevel::new(2).unwrap();
        let request = update_request(id, None, None, Some(level), Some(false));
        assert_eq!(request.endpoint(), format!("/exercises/{}", id));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "difficulty_level": 2, "is_public": false })
        );
    }

    #[test]
    fn test_password_from_args() {
        let args = CredentialArgs {
            username: "alice".to_string(),
            password: Some("hunter2".to_string()),
        };
        let password = resolve_password(&args, true).unwrap();
        assert_eq!(password.expose_secret(), "hunter2");
    }

    #[test]
    fn test_json_format() {
        let out = OutputFormat::Json
            .render(&serde_json::json!({ "a": 1 }), |_| unreachable!())
            .unwrap();
        assert_eq!(out, "{\n  \"a\": 1\n}");
        let out = OutputFormat::from_flag(false)
            .render(&1, |v| format!("value {}", v))
            .unwrap();
        assert_eq!(out, "value 1");
    }
}

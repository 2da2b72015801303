pub mod executor;
pub mod render;

use clap::{Args, Parser, Subcommand};
use exercise_api::endpoints::{DifficultyLevel, InteractionKind, PersonalKind};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "exercises", author, version, about = "Browse and manage exercises", long_about = None)]
pub struct Cli {
    /// Print raw JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    /// Mirror logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend base URL (overrides the config file)
    #[arg(long, global = true, env = "EXERCISES_SERVER_URL")]
    pub server_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create an account
    Register(CredentialArgs),
    /// Log in and store the session
    Login(CredentialArgs),
    /// Forget the stored session
    Logout,
    /// Show who is logged in
    Whoami,
    /// List exercises
    List(FilterArgs),
    /// List exercises you created
    Mine,
    /// Show one exercise
    Show { id: Uuid },
    /// List your favorite or saved exercises
    Personal {
        /// favorites or saved; both when omitted
        #[arg(long)]
        kind: Option<PersonalKind>,
    },
    /// Create an exercise
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// 1 (easiest) to 5 (hardest)
        #[arg(long)]
        difficulty: DifficultyLevel,
        /// Hide the exercise from other users
        #[arg(long)]
        private: bool,
    },
    /// Change fields of an exercise
    Update {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        difficulty: Option<DifficultyLevel>,
        #[arg(long)]
        public: Option<bool>,
    },
    /// Delete an exercise
    Delete { id: Uuid },
    Favorite { id: Uuid },
    Unfavorite { id: Uuid },
    Save { id: Uuid },
    Unsave { id: Uuid },
    /// Rate an exercise from 1 to 5
    Rate { id: Uuid, value: u8 },
    /// List the ratings of an exercise
    Ratings { id: Uuid },
    /// List users who favorited or saved an exercise
    Interactions {
        id: Uuid,
        /// favorites or saves
        #[arg(long, default_value = "favorites")]
        kind: InteractionKind,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct CredentialArgs {
    pub username: String,
    /// Prompted for when omitted
    #[arg(long, env = "EXERCISES_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct FilterArgs {
    /// Case-insensitive name match
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub difficulty: Option<DifficultyLevel>,
    /// Order by difficulty instead of creation
    #[arg(long)]
    pub sort: bool,
}

impl Command {
    /// Commands that change server state print the returned record.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Command::Create { .. }
                | Command::Update { .. }
                | Command::Delete { .. }
                | Command::Favorite { .. }
                | Command::Unfavorite { .. }
                | Command::Save { .. }
                | Command::Unsave { .. }
                | Command::Rate { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("exercises").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_list_filters() {
        let cli = parse(&["list", "--name", "squat", "--difficulty", "3", "--sort"]);
        assert_eq!(
            cli.command,
            Command::List(FilterArgs {
                name: Some("squat".to_string()),
                description: None,
                difficulty: Some(DifficultyLevel::new(3).unwrap()),
                sort: true,
            })
        );
    }

    #[test]
    fn test_out_of_range_difficulty_is_rejected() {
        let result = Cli::try_parse_from(["exercises", "create", "--name", "x", "--difficulty", "6"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_personal_kind() {
        let cli = parse(&["personal", "--kind", "saved"]);
        assert_eq!(
            cli.command,
            Command::Personal {
                kind: Some(PersonalKind::Saved)
            }
        );
        assert_eq!(parse(&["personal"]).command, Command::Personal { kind: None });
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["whoami", "--json", "-v"]);
        assert!(cli.json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_interactions_default_kind() {
        let id = Uuid::new_v4();
        let cli = parse(&["interactions", &id.to_string()]);
        assert_eq!(
            cli.command,
            Command::Interactions {
                id,
                kind: InteractionKind::Favorites
            }
        );
    }

    #[test]
    fn test_mutations() {
        let id = Uuid::new_v4();
        assert!(Command::Delete { id }.is_mutation());
        assert!(Command::Rate { id, value: 4 }.is_mutation());
        assert!(!Command::Show { id }.is_mutation());
        assert!(!Command::Logout.is_mutation());
    }
}

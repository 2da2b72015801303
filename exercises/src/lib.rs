mod app;
pub mod client;
pub mod commands;
pub mod error;
pub mod logging;
pub mod session;

pub use app::App;
pub use client::ExerciseClient;
pub use error::ClientError;
pub use session::{SessionManager, SessionState};

use exercise_api::{ExerciseApiError, HttpTransport, Request, Transport, endpoints::DifficultyLevel};

#[tokio::main]
pub async fn main() -> Result<(), ExerciseApiError> {
    let transport = HttpTransport::new("http://localhost:8000");

    let level = DifficultyLevel::new(2).expect("valid level");
    let req = Request::exercises()
        .list()
        .difficulty_level(level)
        .sort_by_difficulty(true);

    let exercises = transport.send("access_token", req).await?;
    for exercise in exercises {
        println!("{} ({})", exercise.name, exercise.difficulty_level);
    }
    Ok(())
}

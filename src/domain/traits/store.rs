use crate::application::errors::StorageError;
use crate::domain::entities::{
    Exercise, NewExercise, NewUser, NewWorkout, NewWorkoutExercise, User, Workout, WorkoutExercise,
};

/// Tables that can be counted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Exercise,
    Workout,
    WorkoutExercise,
}

impl EntityKind {
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::Exercise => "exercises",
            EntityKind::Workout => "workouts",
            EntityKind::WorkoutExercise => "workout_exercises",
        }
    }
}

/// Persistence gateway used by the command handlers.
///
/// Every call stands alone: nothing spans a transaction across two calls.
/// Creation assigns the identity and timestamps. Lookups by id return
/// `StorageError::NotFound` when the row is absent; lookups by filter return
/// `Option`/`Vec`. Listings come back in insertion (id) order.
pub trait WorkoutStore: Send {
    // Users
    /// Fails with `StorageError::Conflict` when the username is taken
    fn create_user(&self, user: &NewUser) -> Result<User, StorageError>;
    fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError>;

    // Exercise catalog
    fn create_exercise(&self, exercise: &NewExercise) -> Result<Exercise, StorageError>;
    fn find_exercise(&self, id: i64) -> Result<Exercise, StorageError>;
    fn list_exercises(&self) -> Result<Vec<Exercise>, StorageError>;

    // Workouts
    fn create_workout(&self, workout: &NewWorkout) -> Result<Workout, StorageError>;
    fn find_workout(&self, id: i64) -> Result<Workout, StorageError>;
    fn list_workouts(&self) -> Result<Vec<Workout>, StorageError>;

    // Workout entries
    /// Dangling workout or exercise ids are rejected with `StorageError::Constraint`
    fn add_workout_exercise(&self, entry: &NewWorkoutExercise) -> Result<WorkoutExercise, StorageError>;
    fn list_workout_exercises(&self, workout_id: i64) -> Result<Vec<WorkoutExercise>, StorageError>;

    fn count(&self, kind: EntityKind) -> Result<i64, StorageError>;
}

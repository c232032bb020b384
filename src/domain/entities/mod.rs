//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod exercise;
pub mod workout;
pub mod message;
pub mod command;

pub use user::{User, NewUser, MAX_USERNAME_LEN};
pub use exercise::{Exercise, NewExercise};
pub use workout::{Workout, NewWorkout, WorkoutExercise, NewWorkoutExercise, MAX_TITLE_LEN};
pub use message::{Message, Content};
pub use command::CommandKind;

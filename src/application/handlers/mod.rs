//! Command handlers - one per entry in the command table
//!
//! Each handler validates its arguments, talks to the store and auth service
//! through a [`HandlerContext`], and returns the reply text. Failures a user
//! can act on come back as [`CommandError`] variants whose display is the
//! reply; anything else is `CommandError::Internal`.

use crate::application::auth::AuthService;
use crate::application::errors::CommandError;
use crate::domain::entities::CommandKind;
use crate::domain::traits::WorkoutStore;

pub mod account;
pub mod exercises;
pub mod help;
pub mod stats;
pub mod workouts;

pub use account::{LoginHandler, LogoutHandler, SignupHandler};
pub use exercises::ExercisesHandler;
pub use help::{help_text, HelpHandler, UNKNOWN_COMMAND_REPLY};
pub use stats::StatsHandler;
pub use workouts::{AddExerciseHandler, CreateWorkoutHandler, MyWorkoutsHandler};

/// Handler result
pub type HandlerResult = Result<String, CommandError>;

/// Collaborators available to a handler for the duration of one command
pub struct HandlerContext<'a> {
    pub store: &'a dyn WorkoutStore,
    pub auth: &'a AuthService,
}

pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &HandlerContext<'_>, args: &[String]) -> HandlerResult;
}

/// Fixed routing table
pub fn handler_for(kind: CommandKind) -> &'static dyn Handler {
    match kind {
        CommandKind::Start | CommandKind::Help => &HelpHandler,
        CommandKind::Signup => &SignupHandler,
        CommandKind::Login => &LoginHandler,
        CommandKind::Exercises => &ExercisesHandler,
        CommandKind::CreateWorkout => &CreateWorkoutHandler,
        CommandKind::AddExercise => &AddExerciseHandler,
        CommandKind::MyWorkouts => &MyWorkoutsHandler,
        CommandKind::Stats => &StatsHandler,
        CommandKind::Logout => &LogoutHandler,
    }
}

pub(crate) fn require_args(kind: CommandKind, args: &[String]) -> Result<(), CommandError> {
    if args.len() < kind.min_args() {
        return Err(CommandError::Usage(kind.usage().to_string()));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Duration;

    use super::*;
    use crate::application::auth::TOKEN_TTL_DAYS;
    use crate::infrastructure::config::MIN_BCRYPT_COST;
    use crate::infrastructure::storage::MemoryStore;

    pub struct Fixture {
        pub store: MemoryStore,
        pub auth: AuthService,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self {
                store: MemoryStore::new(),
                auth: AuthService::new(b"test-secret", MIN_BCRYPT_COST, Duration::days(TOKEN_TTL_DAYS)),
            }
        }

        pub fn run(&self, kind: CommandKind, args: &[&str]) -> HandlerResult {
            let ctx = HandlerContext { store: &self.store, auth: &self.auth };
            let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
            handler_for(kind).handle(&ctx, &args)
        }
    }
}

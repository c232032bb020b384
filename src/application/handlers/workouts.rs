//! `/createworkout`, `/addexercise` and `/myworkouts`

use chrono::Utc;
use std::str::FromStr;

use super::{require_args, Handler, HandlerContext, HandlerResult};
use crate::application::errors::{CommandError, StorageError};
use crate::domain::entities::{CommandKind, NewWorkout, NewWorkoutExercise, MAX_TITLE_LEN};

pub const EXERCISE_ADDED_REPLY: &str = "Exercise added";
pub const ADD_FAILED_REPLY: &str = "Error adding exercise to workout";
pub const NO_WORKOUTS_REPLY: &str = "No workouts yet";

/// Numbers that fail to parse are stored as zero instead of being rejected.
/// The warning is the only trace of the coercion.
fn lenient<T: FromStr + Default>(field: &str, raw: &str) -> T {
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!("Could not parse {} from {:?}, storing 0", field, raw);
        T::default()
    })
}

fn lenient_weight(raw: &str) -> f64 {
    let weight: f64 = lenient("weight", raw);
    if weight.is_finite() {
        weight
    } else {
        tracing::warn!("Non-finite weight {:?}, storing 0", raw);
        0.0
    }
}

/// `/createworkout title...` - every remaining token becomes the title
pub struct CreateWorkoutHandler;

impl Handler for CreateWorkoutHandler {
    fn handle(&self, ctx: &HandlerContext<'_>, args: &[String]) -> HandlerResult {
        require_args(CommandKind::CreateWorkout, args)?;

        let title = args.join(" ");
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(CommandError::Validation(format!(
                "Title must be at most {} characters",
                MAX_TITLE_LEN
            )));
        }

        let workout = ctx.store.create_workout(&NewWorkout::new(title).with_date(Utc::now()))?;
        tracing::info!("Created workout {} (id={})", workout.title, workout.id);

        Ok(format!("Workout '{}' created (id={})", workout.title, workout.id))
    }
}

/// `/addexercise workout_id exercise_id sets reps weight`
///
/// Ids are not checked up front; the store's reference check is the only guard.
pub struct AddExerciseHandler;

impl Handler for AddExerciseHandler {
    fn handle(&self, ctx: &HandlerContext<'_>, args: &[String]) -> HandlerResult {
        require_args(CommandKind::AddExercise, args)?;

        let entry = NewWorkoutExercise {
            workout_id: lenient("workout_id", &args[0]),
            exercise_id: lenient("exercise_id", &args[1]),
            sets: lenient("sets", &args[2]),
            reps: lenient("reps", &args[3]),
            weight: lenient_weight(&args[4]),
        };

        match ctx.store.add_workout_exercise(&entry) {
            Ok(created) => {
                tracing::info!(
                    "Added entry {} to workout {} (exercise {})",
                    created.id, created.workout_id, created.exercise_id
                );
                Ok(EXERCISE_ADDED_REPLY.to_string())
            }
            Err(e) => {
                tracing::warn!("Failed to add exercise entry {:?}: {}", entry, e);
                Err(CommandError::Conflict(ADD_FAILED_REPLY.to_string()))
            }
        }
    }
}

/// `/myworkouts` - every workout with its entries.
///
/// An entry whose exercise no longer exists is left out of the listing.
pub struct MyWorkoutsHandler;

impl Handler for MyWorkoutsHandler {
    fn handle(&self, ctx: &HandlerContext<'_>, _args: &[String]) -> HandlerResult {
        let workouts = ctx.store.list_workouts()?;
        if workouts.is_empty() {
            return Ok(NO_WORKOUTS_REPLY.to_string());
        }

        let mut reply = String::new();
        for workout in &workouts {
            reply.push_str(&format!("{}: {}\n", workout.id, workout.title));

            for entry in ctx.store.list_workout_exercises(workout.id)? {
                let exercise = match ctx.store.find_exercise(entry.exercise_id) {
                    Ok(exercise) => exercise,
                    Err(StorageError::NotFound(_)) => {
                        tracing::warn!(
                            "Skipping entry {} of workout {}: exercise {} is missing",
                            entry.id, workout.id, entry.exercise_id
                        );
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                };

                reply.push_str(&format!(
                    "   - {}: {} sets x {} reps, weight {:.2}\n",
                    exercise.name, entry.sets, entry.reps, entry.weight
                ));
            }

            reply.push('\n');
        }

        Ok(reply.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::*;
    use crate::application::errors::StorageError;
    use crate::domain::entities::{
        Exercise, NewExercise, NewUser, NewWorkout, User, Workout, WorkoutExercise,
    };
    use crate::domain::traits::{EntityKind, WorkoutStore};

    fn with_squats(fx: &Fixture) {
        fx.store.create_exercise(&NewExercise::new("Push-ups", "Bodyweight chest exercise", "strength")).unwrap();
        fx.store.create_exercise(&NewExercise::new("Squats", "Compound leg exercise", "strength")).unwrap();
    }

    #[test]
    fn test_create_workout_joins_title() {
        let fx = Fixture::new();
        let reply = fx.run(CommandKind::CreateWorkout, &["Leg", "Day"]).unwrap();
        assert_eq!(reply, "Workout 'Leg Day' created (id=1)");

        let workouts = fx.store.list_workouts().unwrap();
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].title, "Leg Day");
        assert!(workouts[0].date.is_some());
        assert_eq!(workouts[0].user_id, None);
    }

    #[test]
    fn test_create_workout_without_title() {
        let fx = Fixture::new();
        let err = fx.run(CommandKind::CreateWorkout, &[]).unwrap_err();
        assert_eq!(err.reply(), "Usage: /createworkout title");
        assert_eq!(fx.store.count(EntityKind::Workout).unwrap(), 0);
    }

    #[test]
    fn test_create_workout_title_too_long() {
        let fx = Fixture::new();
        let title = "t".repeat(MAX_TITLE_LEN + 1);
        let err = fx.run(CommandKind::CreateWorkout, &[title.as_str()]).unwrap_err();
        assert!(matches!(err, CommandError::Validation(_)));
        assert_eq!(fx.store.count(EntityKind::Workout).unwrap(), 0);
    }

    #[test]
    fn test_add_exercise() {
        let fx = Fixture::new();
        with_squats(&fx);
        fx.run(CommandKind::CreateWorkout, &["Leg", "Day"]).unwrap();

        let reply = fx.run(CommandKind::AddExercise, &["1", "2", "3", "10", "55.5"]).unwrap();
        assert_eq!(reply, EXERCISE_ADDED_REPLY);

        let entries = fx.store.list_workout_exercises(1).unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!((entry.workout_id, entry.exercise_id), (1, 2));
        assert_eq!((entry.sets, entry.reps), (3, 10));
        assert_eq!(entry.weight, 55.5);
    }

    #[test]
    fn test_add_exercise_coerces_garbage_to_zero() {
        let fx = Fixture::new();
        with_squats(&fx);
        fx.run(CommandKind::CreateWorkout, &["Leg", "Day"]).unwrap();

        // Non-numeric sets are stored as 0 rather than rejected
        let reply = fx.run(CommandKind::AddExercise, &["1", "2", "x", "10", "55.5"]).unwrap();
        assert_eq!(reply, EXERCISE_ADDED_REPLY);

        let entry = &fx.store.list_workout_exercises(1).unwrap()[0];
        assert_eq!(entry.sets, 0);
        assert_eq!(entry.reps, 10);
        assert_eq!(entry.weight, 55.5);

        fx.run(CommandKind::AddExercise, &["1", "2", "3", "10", "NaN"]).unwrap();
        let entry = &fx.store.list_workout_exercises(1).unwrap()[1];
        assert_eq!(entry.weight, 0.0);
    }

    #[test]
    fn test_add_exercise_unknown_ids() {
        let fx = Fixture::new();
        with_squats(&fx);

        let err = fx.run(CommandKind::AddExercise, &["7", "2", "3", "10", "55.5"]).unwrap_err();
        assert_eq!(err.reply(), ADD_FAILED_REPLY);

        // Unparsable ids coerce to 0, which never exists
        fx.run(CommandKind::CreateWorkout, &["w"]).unwrap();
        let err = fx.run(CommandKind::AddExercise, &["1", "two", "3", "10", "5"]).unwrap_err();
        assert_eq!(err.reply(), ADD_FAILED_REPLY);
        assert_eq!(fx.store.count(EntityKind::WorkoutExercise).unwrap(), 0);
    }

    #[test]
    fn test_add_exercise_usage() {
        let fx = Fixture::new();
        let err = fx.run(CommandKind::AddExercise, &["1", "2", "3", "10"]).unwrap_err();
        assert_eq!(err.reply(), "Usage: /addexercise workout_id exercise_id sets reps weight");
    }

    #[test]
    fn test_my_workouts_empty() {
        let fx = Fixture::new();
        assert_eq!(fx.run(CommandKind::MyWorkouts, &[]).unwrap(), NO_WORKOUTS_REPLY);
    }

    #[test]
    fn test_my_workouts_lists_entries() {
        let fx = Fixture::new();
        with_squats(&fx);
        fx.run(CommandKind::CreateWorkout, &["Leg", "Day"]).unwrap();
        fx.run(CommandKind::CreateWorkout, &["Rest"]).unwrap();
        fx.run(CommandKind::AddExercise, &["1", "2", "3", "10", "55.5"]).unwrap();

        let reply = fx.run(CommandKind::MyWorkouts, &[]).unwrap();
        assert!(reply.contains("1: Leg Day"));
        assert!(reply.contains("Squats: 3 sets x 10 reps, weight 55.50"));
        assert!(reply.ends_with("2: Rest"));
    }

    /// Store whose catalog lookups fail, to exercise the skip path
    struct MissingExercises(crate::infrastructure::storage::MemoryStore);

    impl WorkoutStore for MissingExercises {
        fn create_user(&self, user: &NewUser) -> Result<User, StorageError> {
            self.0.create_user(user)
        }
        fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
            self.0.find_user_by_username(username)
        }
        fn create_exercise(&self, exercise: &NewExercise) -> Result<Exercise, StorageError> {
            self.0.create_exercise(exercise)
        }
        fn find_exercise(&self, id: i64) -> Result<Exercise, StorageError> {
            Err(StorageError::NotFound(format!("exercise {}", id)))
        }
        fn list_exercises(&self) -> Result<Vec<Exercise>, StorageError> {
            self.0.list_exercises()
        }
        fn create_workout(&self, workout: &NewWorkout) -> Result<Workout, StorageError> {
            self.0.create_workout(workout)
        }
        fn find_workout(&self, id: i64) -> Result<Workout, StorageError> {
            self.0.find_workout(id)
        }
        fn list_workouts(&self) -> Result<Vec<Workout>, StorageError> {
            self.0.list_workouts()
        }
        fn add_workout_exercise(&self, entry: &NewWorkoutExercise) -> Result<WorkoutExercise, StorageError> {
            self.0.add_workout_exercise(entry)
        }
        fn list_workout_exercises(&self, workout_id: i64) -> Result<Vec<WorkoutExercise>, StorageError> {
            self.0.list_workout_exercises(workout_id)
        }
        fn count(&self, kind: EntityKind) -> Result<i64, StorageError> {
            self.0.count(kind)
        }
    }

    #[test]
    fn test_my_workouts_skips_missing_exercise() {
        let fx = Fixture::new();
        let store = MissingExercises(crate::infrastructure::storage::MemoryStore::new());
        store.create_exercise(&NewExercise::new("Squats", "Compound leg exercise", "strength")).unwrap();
        store.create_workout(&NewWorkout::new("Leg Day")).unwrap();
        store
            .add_workout_exercise(&NewWorkoutExercise { workout_id: 1, exercise_id: 1, sets: 3, reps: 10, weight: 55.5 })
            .unwrap();

        let ctx = HandlerContext { store: &store, auth: &fx.auth };
        let reply = MyWorkoutsHandler.handle(&ctx, &[]).unwrap();
        assert_eq!(reply, "1: Leg Day");
    }
}

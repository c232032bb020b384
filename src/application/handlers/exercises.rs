use super::{Handler, HandlerContext, HandlerResult};

pub const NO_EXERCISES_REPLY: &str = "No exercises found";

/// `/exercises` - the whole catalog, one `id) name — description (category)` line each
pub struct ExercisesHandler;

impl Handler for ExercisesHandler {
    fn handle(&self, ctx: &HandlerContext<'_>, _args: &[String]) -> HandlerResult {
        let exercises = ctx.store.list_exercises()?;
        if exercises.is_empty() {
            return Ok(NO_EXERCISES_REPLY.to_string());
        }

        let mut reply = "Exercises:".to_string();
        for exercise in &exercises {
            reply.push_str(&format!("\n{}", exercise));
        }
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::*;
    use crate::domain::entities::{CommandKind, NewExercise};
    use crate::domain::traits::WorkoutStore;
    use crate::infrastructure::seed::seed_exercises;

    #[test]
    fn test_empty_catalog() {
        let fx = Fixture::new();
        assert_eq!(fx.run(CommandKind::Exercises, &[]).unwrap(), NO_EXERCISES_REPLY);
    }

    #[test]
    fn test_lists_fields_in_order() {
        let fx = Fixture::new();
        fx.store
            .create_exercise(&NewExercise::new("Squats", "Compound leg exercise", "strength"))
            .unwrap();

        let reply = fx.run(CommandKind::Exercises, &[]).unwrap();
        assert!(reply.contains("1) Squats — Compound leg exercise (strength)"));
    }

    #[test]
    fn test_lists_seeded_catalog() {
        let fx = Fixture::new();
        seed_exercises(&fx.store).unwrap();

        let reply = fx.run(CommandKind::Exercises, &[]).unwrap();
        assert_eq!(reply.lines().count(), 6);
        assert!(reply.contains("4) Running - 5km — Cardio 5 kilometers run (cardio)"));
    }
}

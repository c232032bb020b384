use super::{Handler, HandlerContext, HandlerResult};
use crate::domain::traits::EntityKind;

/// `/stats` - global row counts
pub struct StatsHandler;

impl Handler for StatsHandler {
    fn handle(&self, ctx: &HandlerContext<'_>, _args: &[String]) -> HandlerResult {
        let workouts = ctx.store.count(EntityKind::Workout)?;
        let entries = ctx.store.count(EntityKind::WorkoutExercise)?;

        Ok(format!(
            "Stats:\nTotal workouts: {}\nTotal workout-exercises: {}",
            workouts, entries
        ))
    }
}

//! Starter exercise catalog

use crate::application::errors::StorageError;
use crate::domain::entities::NewExercise;
use crate::domain::traits::{EntityKind, WorkoutStore};

pub fn catalog() -> Vec<NewExercise> {
    vec![
        NewExercise::new("Push-ups", "Bodyweight chest exercise", "strength"),
        NewExercise::new("Squats", "Compound leg exercise", "strength"),
        NewExercise::new("Plank", "Core stability", "flexibility"),
        NewExercise::new("Running - 5km", "Cardio 5 kilometers run", "cardio"),
        NewExercise::new("Burpees", "Full body high-intensity", "cardio"),
    ]
}

/// Insert the catalog when the exercise table is empty. Returns how many rows were added.
pub fn seed_exercises(store: &dyn WorkoutStore) -> Result<usize, StorageError> {
    if store.count(EntityKind::Exercise)? > 0 {
        tracing::debug!("Exercise catalog already present, skipping seed");
        return Ok(0);
    }

    let exercises = catalog();
    for exercise in &exercises {
        store.create_exercise(exercise)?;
    }

    tracing::info!("Seeded exercises.");
    Ok(exercises.len())
}

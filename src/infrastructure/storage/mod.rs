//! In-memory workout store
//!
//! Follows the same rules as the SQLite store (unique usernames, entries must
//! reference existing rows, ids start at 1) so handlers can be exercised
//! without a database file.

use chrono::Utc;
use std::sync::{Mutex, MutexGuard};

use crate::application::errors::StorageError;
use crate::domain::entities::{
    Exercise, NewExercise, NewUser, NewWorkout, NewWorkoutExercise, User, Workout, WorkoutExercise,
};
use crate::domain::traits::{EntityKind, WorkoutStore};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    exercises: Vec<Exercise>,
    workouts: Vec<Workout>,
    workout_exercises: Vec<WorkoutExercise>,
}

impl Tables {
    // Ids are never reused since nothing is deleted
    fn next_id(len: usize) -> i64 {
        len as i64 + 1
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StorageError> {
        self.tables.lock()
            .map_err(|_| StorageError::Unavailable("Lock poisoned".to_string()))
    }
}

impl WorkoutStore for MemoryStore {
    fn create_user(&self, user: &NewUser) -> Result<User, StorageError> {
        let mut tables = self.lock()?;
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(StorageError::Conflict(format!("username {}", user.username)));
        }

        let now = Utc::now();
        let created = User {
            id: Tables::next_id(tables.users.len()),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        let tables = self.lock()?;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    fn create_exercise(&self, exercise: &NewExercise) -> Result<Exercise, StorageError> {
        let mut tables = self.lock()?;
        let now = Utc::now();
        let created = Exercise {
            id: Tables::next_id(tables.exercises.len()),
            name: exercise.name.clone(),
            description: exercise.description.clone(),
            category: exercise.category.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.exercises.push(created.clone());
        Ok(created)
    }

    fn find_exercise(&self, id: i64) -> Result<Exercise, StorageError> {
        let tables = self.lock()?;
        tables.exercises.iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("exercise {}", id)))
    }

    fn list_exercises(&self) -> Result<Vec<Exercise>, StorageError> {
        Ok(self.lock()?.exercises.clone())
    }

    fn create_workout(&self, workout: &NewWorkout) -> Result<Workout, StorageError> {
        let mut tables = self.lock()?;
        if let Some(user_id) = workout.user_id {
            if !tables.users.iter().any(|u| u.id == user_id) {
                return Err(StorageError::Constraint(format!("user {} does not exist", user_id)));
            }
        }

        let now = Utc::now();
        let created = Workout {
            id: Tables::next_id(tables.workouts.len()),
            user_id: workout.user_id,
            title: workout.title.clone(),
            date: workout.date,
            comment: workout.comment.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.workouts.push(created.clone());
        Ok(created)
    }

    fn find_workout(&self, id: i64) -> Result<Workout, StorageError> {
        let tables = self.lock()?;
        tables.workouts.iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("workout {}", id)))
    }

    fn list_workouts(&self) -> Result<Vec<Workout>, StorageError> {
        Ok(self.lock()?.workouts.clone())
    }

    fn add_workout_exercise(&self, entry: &NewWorkoutExercise) -> Result<WorkoutExercise, StorageError> {
        let mut tables = self.lock()?;
        if !tables.workouts.iter().any(|w| w.id == entry.workout_id) {
            return Err(StorageError::Constraint(format!("workout {} does not exist", entry.workout_id)));
        }
        if !tables.exercises.iter().any(|e| e.id == entry.exercise_id) {
            return Err(StorageError::Constraint(format!("exercise {} does not exist", entry.exercise_id)));
        }

        let created = WorkoutExercise {
            id: Tables::next_id(tables.workout_exercises.len()),
            workout_id: entry.workout_id,
            exercise_id: entry.exercise_id,
            sets: entry.sets,
            reps: entry.reps,
            weight: entry.weight,
        };
        tables.workout_exercises.push(created.clone());
        Ok(created)
    }

    fn list_workout_exercises(&self, workout_id: i64) -> Result<Vec<WorkoutExercise>, StorageError> {
        let tables = self.lock()?;
        Ok(tables.workout_exercises.iter()
            .filter(|e| e.workout_id == workout_id)
            .cloned()
            .collect())
    }

    fn count(&self, kind: EntityKind) -> Result<i64, StorageError> {
        let tables = self.lock()?;
        let count = match kind {
            EntityKind::User => tables.users.len(),
            EntityKind::Exercise => tables.exercises.len(),
            EntityKind::Workout => tables.workouts.len(),
            EntityKind::WorkoutExercise => tables.workout_exercises.len(),
        };
        Ok(count as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usernames_are_unique_and_case_sensitive() {
        let store = MemoryStore::new();
        store.create_user(&NewUser::new("alice", "h")).unwrap();

        assert!(matches!(
            store.create_user(&NewUser::new("alice", "other")),
            Err(StorageError::Conflict(_))
        ));
        assert!(store.create_user(&NewUser::new("Alice", "h")).is_ok());
        assert_eq!(store.count(EntityKind::User).unwrap(), 2);
    }

    #[test]
    fn test_ids_are_sequential() {
        let store = MemoryStore::new();
        let a = store.create_workout(&NewWorkout::new("a")).unwrap();
        let b = store.create_workout(&NewWorkout::new("b")).unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(store.find_workout(2).unwrap().title, "b");
    }

    #[test]
    fn test_entry_requires_existing_rows() {
        let store = MemoryStore::new();
        let entry = NewWorkoutExercise { workout_id: 1, exercise_id: 1, sets: 1, reps: 1, weight: 1.0 };
        assert!(matches!(store.add_workout_exercise(&entry), Err(StorageError::Constraint(_))));

        store.create_workout(&NewWorkout::new("w")).unwrap();
        assert!(matches!(store.add_workout_exercise(&entry), Err(StorageError::Constraint(_))));

        store.create_exercise(&NewExercise::new("Burpees", "Full body high-intensity", "cardio")).unwrap();
        assert!(store.add_workout_exercise(&entry).is_ok());
    }

    #[test]
    fn test_workout_owner_must_exist() {
        let store = MemoryStore::new();
        let err = store.create_workout(&NewWorkout::new("w").with_owner(5)).unwrap_err();
        assert!(matches!(err, StorageError::Constraint(_)));
    }
}

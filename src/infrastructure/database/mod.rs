//! SQLite-backed workout store

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::path::Path;

use crate::application::errors::StorageError;
use crate::domain::entities::{
    Exercise, NewExercise, NewUser, NewWorkout, NewWorkoutExercise, User, Workout, WorkoutExercise,
};
use crate::domain::traits::{EntityKind, WorkoutStore};

const USER_COLUMNS: &str = "id, username, password_hash, created_at, updated_at";
const EXERCISE_COLUMNS: &str = "id, name, description, category, created_at, updated_at";
const WORKOUT_COLUMNS: &str = "id, user_id, title, date, comment, created_at, updated_at";
const ENTRY_COLUMNS: &str = "id, workout_id, exercise_id, sets, reps, weight";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store named by a `DATABASE_URL` value and create the schema
    pub fn open(url: &str) -> Result<Self, StorageError> {
        let path = url.strip_prefix("sqlite://").unwrap_or(url);
        if path.is_empty() {
            return Err(StorageError::Unavailable("empty database path".to_string()));
        }

        if path == ":memory:" {
            return Self::open_in_memory();
        }

        Self::open_path(path)
    }

    pub fn open_path(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        // Off by default in SQLite; dangling entry references must be rejected
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let store = Self { conn };
        store.init_tables()?;
        Ok(store)
    }

    fn init_tables(&self) -> SqliteResult<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                category TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER REFERENCES users(id),
                title TEXT NOT NULL,
                date TEXT,
                comment TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        // No ON DELETE CASCADE: removing a workout or exercise by hand leaves orphans
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS workout_exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_id INTEGER NOT NULL REFERENCES workouts(id),
                exercise_id INTEGER NOT NULL REFERENCES exercises(id),
                sets INTEGER NOT NULL DEFAULT 0,
                reps INTEGER NOT NULL DEFAULT 0,
                weight REAL NOT NULL DEFAULT 0
            )",
            [],
        )?;

        // Create indexes
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_workouts_user ON workouts(user_id)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_workout_exercises_workout ON workout_exercises(workout_id)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_workout_exercises_exercise ON workout_exercises(exercise_id)",
            [],
        )?;

        Ok(())
    }
}

fn user_from_row(row: &Row<'_>) -> SqliteResult<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

fn exercise_from_row(row: &Row<'_>) -> SqliteResult<Exercise> {
    Ok(Exercise {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn workout_from_row(row: &Row<'_>) -> SqliteResult<Workout> {
    Ok(Workout {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        date: row.get(3)?,
        comment: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn entry_from_row(row: &Row<'_>) -> SqliteResult<WorkoutExercise> {
    Ok(WorkoutExercise {
        id: row.get(0)?,
        workout_id: row.get(1)?,
        exercise_id: row.get(2)?,
        sets: row.get(3)?,
        reps: row.get(4)?,
        weight: row.get(5)?,
    })
}

impl WorkoutStore for SqliteStore {
    fn create_user(&self, user: &NewUser) -> Result<User, StorageError> {
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO users (username, password_hash, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
            params![user.username, user.password_hash, now],
        )?;

        Ok(User {
            id: self.conn.last_insert_rowid(),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        let user = self.conn
            .query_row(
                &format!("SELECT {} FROM users WHERE username = ?1", USER_COLUMNS),
                [username],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    fn create_exercise(&self, exercise: &NewExercise) -> Result<Exercise, StorageError> {
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO exercises (name, description, category, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
            params![exercise.name, exercise.description, exercise.category, now],
        )?;

        Ok(Exercise {
            id: self.conn.last_insert_rowid(),
            name: exercise.name.clone(),
            description: exercise.description.clone(),
            category: exercise.category.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    fn find_exercise(&self, id: i64) -> Result<Exercise, StorageError> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM exercises WHERE id = ?1", EXERCISE_COLUMNS),
                [id],
                exercise_from_row,
            )
            .optional()?
            .ok_or_else(|| StorageError::NotFound(format!("exercise {}", id)))
    }

    fn list_exercises(&self) -> Result<Vec<Exercise>, StorageError> {
        let mut stmt = self.conn.prepare(
            &format!("SELECT {} FROM exercises ORDER BY id", EXERCISE_COLUMNS),
        )?;

        let rows = stmt.query_map([], exercise_from_row)?;

        let mut exercises = Vec::new();
        for exercise in rows {
            exercises.push(exercise?);
        }
        Ok(exercises)
    }

    fn create_workout(&self, workout: &NewWorkout) -> Result<Workout, StorageError> {
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO workouts (user_id, title, date, comment, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![workout.user_id, workout.title, workout.date, workout.comment, now],
        )?;

        Ok(Workout {
            id: self.conn.last_insert_rowid(),
            user_id: workout.user_id,
            title: workout.title.clone(),
            date: workout.date,
            comment: workout.comment.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    fn find_workout(&self, id: i64) -> Result<Workout, StorageError> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM workouts WHERE id = ?1", WORKOUT_COLUMNS),
                [id],
                workout_from_row,
            )
            .optional()?
            .ok_or_else(|| StorageError::NotFound(format!("workout {}", id)))
    }

    fn list_workouts(&self) -> Result<Vec<Workout>, StorageError> {
        let mut stmt = self.conn.prepare(
            &format!("SELECT {} FROM workouts ORDER BY id", WORKOUT_COLUMNS),
        )?;

        let rows = stmt.query_map([], workout_from_row)?;

        let mut workouts = Vec::new();
        for workout in rows {
            workouts.push(workout?);
        }
        Ok(workouts)
    }

    fn add_workout_exercise(&self, entry: &NewWorkoutExercise) -> Result<WorkoutExercise, StorageError> {
        self.conn.execute(
            "INSERT INTO workout_exercises (workout_id, exercise_id, sets, reps, weight)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![entry.workout_id, entry.exercise_id, entry.sets, entry.reps, entry.weight],
        )?;

        Ok(WorkoutExercise {
            id: self.conn.last_insert_rowid(),
            workout_id: entry.workout_id,
            exercise_id: entry.exercise_id,
            sets: entry.sets,
            reps: entry.reps,
            weight: entry.weight,
        })
    }

    fn list_workout_exercises(&self, workout_id: i64) -> Result<Vec<WorkoutExercise>, StorageError> {
        let mut stmt = self.conn.prepare(
            &format!("SELECT {} FROM workout_exercises WHERE workout_id = ?1 ORDER BY id", ENTRY_COLUMNS),
        )?;

        let rows = stmt.query_map([workout_id], entry_from_row)?;

        let mut entries = Vec::new();
        for entry in rows {
            entries.push(entry?);
        }
        Ok(entries)
    }

    fn count(&self, kind: EntityKind) -> Result<i64, StorageError> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", kind.table()),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

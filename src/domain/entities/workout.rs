use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_TITLE_LEN: usize = 150;

/// A logged training session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    /// Owning account. The chat commands never set it, so workouts are shared.
    pub user_id: Option<i64>,
    pub title: String,
    pub date: Option<DateTime<Utc>>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub user_id: Option<i64>,
    pub title: String,
    pub date: Option<DateTime<Utc>>,
    pub comment: String,
}

impl NewWorkout {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            user_id: None,
            title: title.into(),
            date: None,
            comment: String::new(),
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_owner(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// One set-block inside a workout. Sets and reps are expected to be
/// non-negative but nothing enforces it; weight carries no unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub sets: i64,
    pub reps: i64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkoutExercise {
    pub workout_id: i64,
    pub exercise_id: i64,
    pub sets: i64,
    pub reps: i64,
    pub weight: f64,
}

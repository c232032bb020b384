//! Domain layer - Core business shapes with no infrastructure dependencies
//!
//! This layer contains:
//! - Entities: Workout log rows (User, Exercise, Workout, WorkoutExercise) and the command table
//! - Traits: Abstractions for infrastructure (Bot transport, WorkoutStore persistence)

pub mod entities;
pub mod traits;

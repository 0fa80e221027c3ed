/// Server services
pub mod tracker;

pub use tracker::{ExerciseInput, ExerciseLog, LogInput, TrackerService};

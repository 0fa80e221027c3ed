mod exercise;
mod ids;
mod log;
mod user;

pub use exercise::{CreateExercise, Exercise, Minutes};
pub use ids::UserId;
pub use log::LogQuery;
pub use user::User;

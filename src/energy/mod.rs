//! Nutritional energy model: dog profile in, daily calorie target out.
//!
//! Pure and synchronous. The wall clock is never read here; an `auto`
//! season has to be resolved by the caller (see [`DogProfile::resolved_for`]).

mod model;
mod profile;

pub use model::{compute_target, CalorieResult};
pub use profile::{ActivityLevel, DogProfile, Environment, GoalMode, LifeStage, SeasonFactor};

use thiserror::Error;
use time::Date;
use tracing::debug;
use uuid::Uuid;

use crate::energy::{compute_target, CalorieResult, DogProfile};
use crate::store::ProfileStore;

#[derive(Debug, Error, PartialEq)]
pub enum ProfileInputError {
    #[error("{0} must be a positive number")]
    NotPositive(&'static str),
    #[error("bcs must be between 1 and 9")]
    BcsOutOfRange,
    #[error("weekly_loss_rate_pct must be between 0.25 and 1.25")]
    RateOutOfRange,
}

pub fn validate_profile(profile: &DogProfile) -> Result<(), ProfileInputError> {
    for (value, field) in [
        (profile.weight_kg, "weight_kg"),
        (profile.target_weight_kg, "target_weight_kg"),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(ProfileInputError::NotPositive(field));
        }
    }
    if !(1..=9).contains(&profile.bcs) {
        return Err(ProfileInputError::BcsOutOfRange);
    }
    if !(0.25..=1.25).contains(&profile.weekly_loss_rate_pct) {
        return Err(ProfileInputError::RateOutOfRange);
    }
    Ok(())
}

/// Daily target for a stored dog, with an `auto` season pinned to `today`.
///
/// Returns `None` when the dog has no profile yet.
pub async fn load_target<S>(
    store: &S,
    user_id: Uuid,
    dog_id: Uuid,
    today: Date,
) -> anyhow::Result<Option<(DogProfile, CalorieResult)>>
where
    S: ProfileStore + ?Sized,
{
    let Some(profile) = store.get_profile(user_id, dog_id).await? else {
        return Ok(None);
    };
    let profile = profile.resolved_for(today);
    let result = compute_target(&profile);
    debug!(%dog_id, season = profile.season_factor.as_str(), recommended = result.recommended, "target computed");
    Ok(Some((profile, result)))
}

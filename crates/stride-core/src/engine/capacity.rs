//! Sustainable daily capacity from recorded history.

use log::debug;

use super::EngineConfig;
use crate::{error::Result, models::DailyAllocation, store::AllocationStore};

/// Estimate today's sustainable effort budget in minutes.
///
/// Store failures propagate; everything else yields a value.
pub fn estimate_daily_capacity<S>(store: &S, config: &EngineConfig) -> Result<u32>
where
    S: AllocationStore + ?Sized,
{
    let samples = store.with_outcomes()?;
    let capacity = capacity_from_samples(&samples, config);
    debug!(
        "Estimated capacity {capacity} min from {} samples",
        samples.len()
    );
    Ok(capacity)
}

/// Mean planned load over days with a recorded outcome, clamped into the
/// configured band. Too little history yields the default.
pub fn capacity_from_samples(samples: &[DailyAllocation], config: &EngineConfig) -> u32 {
    let samples: Vec<&DailyAllocation> = samples.iter().filter(|a| a.has_outcome()).collect();
    if samples.len() < config.min_capacity_samples || samples.is_empty() {
        return config.default_capacity;
    }

    let total: u64 = samples.iter().map(|a| u64::from(a.total_minutes)).sum();
    let mean = total as f64 / samples.len() as f64;
    mean.clamp(f64::from(config.min_capacity), f64::from(config.max_capacity))
        .round() as u32
}

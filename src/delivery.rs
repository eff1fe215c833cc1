//! Delivery records consumed by the search.

use serde::{Deserialize, Serialize};

/// Travel and arrival times, in the matrix's unit.
pub type Time = i64;

/// Reward collected for completing a delivery.
pub type Bonus = i64;

/// A delivery to `target` that may not start before `start_time`.
///
/// Times and bonuses are expected to be non-negative; this is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery<L> {
    pub target: L,
    pub start_time: Time,
    pub bonus: Bonus,
}

impl<L> Delivery<L> {
    pub fn new(target: L, start_time: Time, bonus: Bonus) -> Self {
        Self {
            target,
            start_time,
            bonus,
        }
    }
}

/// Stable sort by earliest start time, keeping input order among ties.
pub fn sort_by_start_time<L>(deliveries: &mut [Delivery<L>]) {
    deliveries.sort_by_key(|delivery| delivery.start_time);
}

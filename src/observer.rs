//! Observer that forwards planner events to `tracing`.

use tracing::{debug, info, trace};

use crate::delivery::{Bonus, Delivery, Time};
use crate::solver::Plan;
use crate::traits::{Location, PlannerObserver};

/// Emits one `tracing` event per planner event.
///
/// Graph and search summaries go out at `info`; per-edge and per-state
/// events at `debug`; per-delivery scoring at `trace`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl<L: Location> PlannerObserver<L> for TracingObserver {
    fn edge_discovered(&mut self, src: &L, dest: &L, weight: Time) {
        debug!(?src, ?dest, weight, "adding edge");
    }

    fn graph_built(&mut self, locations: &[L], edge_count: usize) {
        info!(?locations, edge_count, "graph built");
    }

    fn search_started(&mut self, origin: &L, deliveries: &[Delivery<L>]) {
        info!(?origin, count = deliveries.len(), "starting search");
        debug!(?deliveries, "initial deliveries");
    }

    fn state_popped(&mut self, cost: Time, bonus: Bonus, location: &L, path: &[L]) {
        debug!(cost, bonus, ?location, ?path, "exploring");
    }

    fn delivery_considered(&mut self, target: &L, new_time: Time, start_time: Time) {
        trace!(?target, new_time, start_time, "considering delivery");
    }

    fn state_pushed(&mut self, cost: Time, bonus: Bonus, location: &L, path: &[L]) {
        trace!(cost, bonus, ?location, ?path, "pushing to frontier");
    }

    fn search_finished(&mut self, plan: &Plan<L>) {
        info!(
            bonus = plan.bonus,
            path = ?plan.path,
            arrivals = ?plan.arrivals,
            "best delivery sequence"
        );
    }
}

//! Core domain traits for the delivery planner.
//!
//! These are the seams between graph construction, search and whatever the
//! caller uses for logging or travel-time lookups.

use std::fmt::Debug;
use std::hash::Hash;

use crate::delivery::{Bonus, Delivery, Time};
use crate::solver::Plan;

/// Identifier for a node in the travel network.
///
/// `Ord` is required because locations take part in the frontier ordering.
pub trait Location: Clone + Ord + Hash + Debug {}

impl<T> Location for T where T: Clone + Ord + Hash + Debug {}

/// Direct travel-time lookup between two locations.
pub trait TravelTimeProvider<L: Location> {
    /// Travel time over a single direct edge, or `None` when no edge exists.
    fn time_between(&self, src: &L, dest: &L) -> Option<Time>;
}

/// Receives events from graph construction and search.
///
/// Every method defaults to a no-op so implementors only override the
/// events they care about.
pub trait PlannerObserver<L: Location> {
    /// A nonzero matrix entry produced an edge from `src` to `dest`.
    fn edge_discovered(&mut self, _src: &L, _dest: &L, _weight: Time) {}

    /// Graph construction finished.
    fn graph_built(&mut self, _locations: &[L], _edge_count: usize) {}

    fn search_started(&mut self, _origin: &L, _deliveries: &[Delivery<L>]) {}

    /// A state left the frontier (before the visited check).
    fn state_popped(&mut self, _cost: Time, _bonus: Bonus, _location: &L, _path: &[L]) {}

    /// A delivery reachable from the current state is being scored.
    fn delivery_considered(&mut self, _target: &L, _new_time: Time, _start_time: Time) {}

    fn state_pushed(&mut self, _cost: Time, _bonus: Bonus, _location: &L, _path: &[L]) {}

    /// The search ended; `plan` is the best solution found.
    fn search_finished(&mut self, _plan: &Plan<L>) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<L: Location> PlannerObserver<L> for NoopObserver {}

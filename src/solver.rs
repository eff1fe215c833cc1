//! Best-first search over delivery sequences.
//!
//! States are ordered by estimated arrival time, so cheaper sequences are
//! explored first. Nothing is pruned: every direct-edge-reachable ordering of
//! every subset of deliveries is eventually expanded unless a budget in
//! [`SearchOptions`] stops the search early.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::delivery::{sort_by_start_time, Bonus, Delivery, Time};
use crate::traits::{Location, PlannerObserver, TravelTimeProvider};

#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Stop after this many states have been expanded.
    pub max_expansions: Option<usize>,
    /// Stop once this much wall-clock time has elapsed.
    pub time_limit: Option<Duration>,
}

impl SearchOptions {
    fn budget_exceeded(&self, expanded: usize, elapsed: Duration) -> Option<Termination> {
        if self.max_expansions.is_some_and(|limit| expanded >= limit) {
            return Some(Termination::ExpansionLimit);
        }
        if self.time_limit.is_some_and(|limit| elapsed >= limit) {
            return Some(Termination::TimeLimit);
        }
        None
    }
}

/// Why the search loop stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The frontier emptied; the plan is the true maximum.
    #[default]
    Exhausted,
    ExpansionLimit,
    TimeLimit,
}

/// Best delivery sequence found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan<L> {
    pub bonus: Bonus,
    /// Delivery targets in visiting order.
    pub path: Vec<L>,
    /// Service start time at each entry of `path`, after any waiting.
    pub arrivals: Vec<Time>,
}

impl<L> Plan<L> {
    pub fn empty() -> Self {
        Self {
            bonus: 0,
            path: Vec::new(),
            arrivals: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// States popped and expanded.
    pub expanded: usize,
    /// States pushed onto the frontier.
    pub pushed: usize,
    /// States popped but already visited.
    pub skipped_visited: usize,
    pub termination: Termination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome<L> {
    pub plan: Plan<L>,
    pub stats: SearchStats,
}

/// Frontier entry.
///
/// Ordered by `(estimated_cost, bonus, location, path)`; the frontier wraps
/// states in `Reverse` to pop the smallest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState<L> {
    pub estimated_cost: Time,
    pub bonus: Bonus,
    pub location: L,
    pub path: Vec<L>,
    arrivals: Vec<Time>,
}

impl<L: Location> SearchState<L> {
    pub fn initial(origin: L) -> Self {
        Self {
            estimated_cost: 0,
            bonus: 0,
            location: origin,
            path: Vec::new(),
            arrivals: Vec::new(),
        }
    }

    /// Actual arrival time at the current location, without the heuristic.
    pub fn elapsed(&self) -> Time {
        self.arrivals.last().copied().unwrap_or(0)
    }

    pub fn arrivals(&self) -> &[Time] {
        &self.arrivals
    }

    fn visited_key(&self) -> (Vec<L>, L) {
        (self.path.clone(), self.location.clone())
    }

    fn extend(&self, delivery: &Delivery<L>, arrival: Time, estimated_cost: Time) -> Self {
        let mut path = self.path.clone();
        path.push(delivery.target.clone());
        let mut arrivals = self.arrivals.clone();
        arrivals.push(arrival);

        Self {
            estimated_cost,
            bonus: self.bonus.saturating_add(delivery.bonus),
            location: delivery.target.clone(),
            path,
            arrivals,
        }
    }

    fn to_plan(&self) -> Plan<L> {
        Plan {
            bonus: self.bonus,
            path: self.path.clone(),
            arrivals: self.arrivals.clone(),
        }
    }
}

impl<L: Location> Ord for SearchState<L> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.estimated_cost
            .cmp(&other.estimated_cost)
            .then_with(|| self.bonus.cmp(&other.bonus))
            .then_with(|| self.location.cmp(&other.location))
            .then_with(|| compare_paths(&self.path, &other.path))
            // Only reached for equal paths; keeps Ord consistent with Eq.
            .then_with(|| compare_paths(&self.arrivals, &other.arrivals))
    }
}

impl<L: Location> PartialOrd for SearchState<L> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Element-wise comparison; a strict prefix sorts first.
fn compare_paths<T: Ord>(a: &[T], b: &[T]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            unequal => return unequal,
        }
    }
    a.len().cmp(&b.len())
}

/// Minimum direct-edge travel time from `location` to any delivery target.
///
/// Returns 0 when there are no deliveries or none is directly reachable.
/// Only biases exploration order; it is not used for pruning.
pub fn heuristic<L, P>(provider: &P, location: &L, deliveries: &[Delivery<L>]) -> Time
where
    L: Location,
    P: TravelTimeProvider<L>,
{
    deliveries
        .iter()
        .filter_map(|delivery| provider.time_between(location, &delivery.target))
        .min()
        .unwrap_or(0)
}

/// Search for the delivery sequence with the highest total bonus.
///
/// Deliveries are considered in the given order. Unreachable targets are
/// skipped. With default options the search is exhaustive.
pub fn search<L, P, O>(
    provider: &P,
    deliveries: &[Delivery<L>],
    origin: &L,
    options: &SearchOptions,
    observer: &mut O,
) -> SearchOutcome<L>
where
    L: Location,
    P: TravelTimeProvider<L>,
    O: PlannerObserver<L>,
{
    let started = Instant::now();
    observer.search_started(origin, deliveries);

    // h(target) only depends on the target, so compute it once per target.
    let mut estimates: HashMap<&L, Time> = HashMap::new();
    for delivery in deliveries {
        estimates
            .entry(&delivery.target)
            .or_insert_with(|| heuristic(provider, &delivery.target, deliveries));
    }

    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse(SearchState::initial(origin.clone())));
    let mut visited: HashSet<(Vec<L>, L)> = HashSet::new();
    let mut best = Plan::empty();
    let mut stats = SearchStats::default();

    while let Some(Reverse(state)) = frontier.pop() {
        observer.state_popped(state.estimated_cost, state.bonus, &state.location, &state.path);

        let key = state.visited_key();
        if visited.contains(&key) {
            stats.skipped_visited += 1;
            continue;
        }
        // Checked only for unvisited states so a drained frontier reports Exhausted.
        if let Some(reason) = options.budget_exceeded(stats.expanded, started.elapsed()) {
            stats.termination = reason;
            break;
        }
        visited.insert(key);
        stats.expanded += 1;

        if state.bonus > best.bonus {
            best = state.to_plan();
        }

        for delivery in deliveries {
            if state.path.contains(&delivery.target) {
                continue;
            }
            let Some(travel) = provider.time_between(&state.location, &delivery.target) else {
                continue;
            };

            // The search clock runs on the estimated cost, heuristic included.
            // Arriving early means waiting until the delivery may start.
            let new_time = state
                .estimated_cost
                .saturating_add(travel)
                .max(delivery.start_time);
            observer.delivery_considered(&delivery.target, new_time, delivery.start_time);

            let arrival = state
                .elapsed()
                .saturating_add(travel)
                .max(delivery.start_time);
            let estimate = estimates.get(&delivery.target).copied().unwrap_or(0);
            let child = state.extend(delivery, arrival, new_time.saturating_add(estimate));
            observer.state_pushed(
                child.estimated_cost,
                child.bonus,
                &child.location,
                &child.path,
            );
            frontier.push(Reverse(child));
            stats.pushed += 1;
        }
    }

    observer.search_finished(&best);
    SearchOutcome { plan: best, stats }
}

/// Planner for a single courier starting at a configurable origin.
///
/// Deliveries are stably sorted by start time so that early deliveries are
/// explored first among equal-cost states.
#[derive(Debug, Clone)]
pub struct Planner<'a, L: Location, P> {
    provider: &'a P,
    deliveries: Vec<Delivery<L>>,
    origin: L,
    options: SearchOptions,
}

impl<'a, L, P> Planner<'a, L, P>
where
    L: Location,
    P: TravelTimeProvider<L>,
{
    pub fn new(provider: &'a P, mut deliveries: Vec<Delivery<L>>, origin: L) -> Self {
        sort_by_start_time(&mut deliveries);
        Self {
            provider,
            deliveries,
            origin,
            options: SearchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn origin(&self) -> &L {
        &self.origin
    }

    /// Deliveries in exploration order.
    pub fn deliveries(&self) -> &[Delivery<L>] {
        &self.deliveries
    }

    pub fn plan<O: PlannerObserver<L>>(&self, observer: &mut O) -> SearchOutcome<L> {
        search(
            self.provider,
            &self.deliveries,
            &self.origin,
            &self.options,
            observer,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::traits::NoopObserver;

    fn state(
        cost: Time,
        bonus: Bonus,
        location: &'static str,
        path: &[&'static str],
    ) -> SearchState<&'static str> {
        SearchState {
            estimated_cost: cost,
            bonus,
            location,
            path: path.to_vec(),
            arrivals: vec![0; path.len()],
        }
    }

    #[test]
    fn test_state_orders_by_cost_first() {
        assert!(state(1, 100, "Z", &["Z"]) < state(2, 0, "A", &[]));
    }

    #[test]
    fn test_state_tie_breakers() {
        // bonus, then location, then path
        assert!(state(1, 5, "B", &[]) < state(1, 6, "A", &[]));
        assert!(state(1, 5, "A", &["C"]) < state(1, 5, "B", &["A"]));
        assert!(state(1, 5, "C", &["A", "C"]) < state(1, 5, "C", &["B", "C"]));
    }

    #[test]
    fn test_compare_paths_prefix_first() {
        assert_eq!(compare_paths(&["A"], &["A", "B"]), Ordering::Less);
        assert_eq!(compare_paths(&["B"], &["A", "B"]), Ordering::Greater);
        assert_eq!(compare_paths::<&str>(&[], &[]), Ordering::Equal);
    }

    #[test]
    fn test_frontier_pops_lowest_cost() {
        let mut heap = BinaryHeap::new();
        heap.push(Reverse(state(7, 0, "A", &[])));
        heap.push(Reverse(state(3, 0, "B", &[])));
        heap.push(Reverse(state(5, 0, "C", &[])));

        let order: Vec<_> =
            std::iter::from_fn(|| heap.pop().map(|Reverse(s)| s.estimated_cost)).collect();
        assert_eq!(order, vec![3, 5, 7]);
    }

    #[test]
    fn test_heuristic_minimum_direct_edge() {
        let mut graph = Graph::new(vec!["A", "B", "C"]);
        graph.add_edge("A", "B", 5);
        graph.add_edge("A", "C", 2);

        let deliveries = vec![Delivery::new("B", 0, 1), Delivery::new("C", 0, 1)];
        assert_eq!(heuristic(&graph, &"A", &deliveries), 2);
        assert_eq!(heuristic(&graph, &"B", &deliveries), 0);
        assert_eq!(heuristic(&graph, &"A", &[]), 0);
    }

    #[test]
    fn test_expansion_limit_stops_early() {
        let mut graph = Graph::new(vec!["A", "B", "C"]);
        for (src, dest) in [("A", "B"), ("A", "C"), ("B", "C")] {
            graph.add_edge(src, dest, 1);
            graph.add_edge(dest, src, 1);
        }
        let deliveries = vec![Delivery::new("B", 0, 1), Delivery::new("C", 0, 1)];
        let options = SearchOptions {
            max_expansions: Some(1),
            ..SearchOptions::default()
        };

        let outcome = search(&graph, &deliveries, &"A", &options, &mut NoopObserver);
        assert_eq!(outcome.stats.expanded, 1);
        assert_eq!(outcome.stats.termination, Termination::ExpansionLimit);
        // Only the origin was expanded.
        assert_eq!(outcome.plan, Plan::empty());
    }

    #[test]
    fn test_zero_time_limit_returns_empty_plan() {
        let mut graph = Graph::new(vec!["A", "B"]);
        graph.add_edge("A", "B", 1);
        let deliveries = vec![Delivery::new("B", 0, 4)];
        let options = SearchOptions {
            time_limit: Some(Duration::ZERO),
            ..SearchOptions::default()
        };

        let outcome = search(&graph, &deliveries, &"A", &options, &mut NoopObserver);
        assert_eq!(outcome.stats.termination, Termination::TimeLimit);
        assert_eq!(outcome.plan.bonus, 0);
    }

    #[test]
    fn test_budget_ignores_already_visited_leftovers() {
        let mut graph = Graph::new(vec!["A", "B"]);
        graph.add_edge("A", "B", 1);
        // Two identical deliveries push two identical [B] states.
        let deliveries = vec![Delivery::new("B", 0, 1), Delivery::new("B", 0, 1)];
        let options = SearchOptions {
            max_expansions: Some(2),
            ..SearchOptions::default()
        };

        let outcome = search(&graph, &deliveries, &"A", &options, &mut NoopObserver);
        assert_eq!(outcome.stats.expanded, 2);
        assert_eq!(outcome.stats.skipped_visited, 1);
        assert_eq!(outcome.stats.termination, Termination::Exhausted);
        assert_eq!(outcome.plan.bonus, 1);
    }
}

//! Weighted travel graph built from an adjacency matrix.
//!
//! Every nonzero matrix entry becomes two independent directed adjacency
//! entries, one from each endpoint. Nothing is deduplicated, so an asymmetric
//! matrix keeps both weights and each lookup only consults the source's list.

use std::collections::HashMap;

use crate::delivery::Time;
use crate::error::ParseError;
use crate::traits::{Location, PlannerObserver, TravelTimeProvider};

/// Adjacency-list graph keyed by location.
#[derive(Debug, Clone)]
pub struct Graph<L: Location> {
    locations: Vec<L>,
    adjacency: HashMap<L, Vec<(L, Time)>>,
}

impl<L: Location> Graph<L> {
    /// Empty graph over the given declared locations.
    pub fn new(locations: Vec<L>) -> Self {
        Self {
            locations,
            adjacency: HashMap::new(),
        }
    }

    /// Append a directed entry `src -> dest`. No reverse entry is added.
    pub fn add_edge(&mut self, src: L, dest: L, weight: Time) {
        self.adjacency.entry(src).or_default().push((dest, weight));
    }

    /// Locations in declaration order.
    pub fn locations(&self) -> &[L] {
        &self.locations
    }

    /// Adjacency entries of `location`, empty if it has none.
    pub fn neighbors(&self, location: &L) -> &[(L, Time)] {
        self.adjacency
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of directed adjacency entries.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Direct-edge travel time from `src` to `dest`.
    ///
    /// Scans `src`'s entries and returns the first match. Never computes a
    /// multi-hop path.
    pub fn time_between(&self, src: &L, dest: &L) -> Option<Time> {
        self.neighbors(src)
            .iter()
            .find(|(neighbor, _)| neighbor == dest)
            .map(|&(_, time)| time)
    }
}

impl Graph<String> {
    /// Build a graph from matrix rows.
    ///
    /// Row 0 holds the location labels; rows 1..=N hold the N×N weight
    /// matrix, where `0` means no direct edge. Each nonzero entry `(i, j)`
    /// adds `loc_i -> loc_j` and, separately, `loc_j -> loc_i`.
    pub fn from_matrix<S, O>(rows: &[Vec<S>], observer: &mut O) -> Result<Self, ParseError>
    where
        S: AsRef<str>,
        O: PlannerObserver<String>,
    {
        let (header, weight_rows) = rows.split_first().ok_or(ParseError::MissingLocationRow)?;
        let locations: Vec<String> = header
            .iter()
            .map(|label| label.as_ref().trim().to_string())
            .collect();
        let n = locations.len();

        if weight_rows.len() != n {
            return Err(ParseError::RowCount {
                expected: n,
                found: weight_rows.len(),
            });
        }

        // Validate everything before inserting so no partial graph escapes.
        let mut edges = Vec::new();
        for (i, row) in weight_rows.iter().enumerate() {
            if row.len() != n {
                return Err(ParseError::RowLength {
                    row: i + 1,
                    expected: n,
                    found: row.len(),
                });
            }
            for (j, cell) in row.iter().enumerate() {
                let weight = parse_weight(cell.as_ref(), i + 1, j)?;
                if weight != 0 {
                    edges.push((i, j, weight));
                }
            }
        }

        let mut graph = Self::new(locations);
        for (i, j, weight) in edges {
            let src = graph.locations[i].clone();
            let dest = graph.locations[j].clone();
            observer.edge_discovered(&src, &dest, weight);
            graph.add_edge(src.clone(), dest.clone(), weight);
            graph.add_edge(dest, src, weight);
        }

        observer.graph_built(&graph.locations, graph.edge_count());
        Ok(graph)
    }
}

impl<L: Location> TravelTimeProvider<L> for Graph<L> {
    fn time_between(&self, src: &L, dest: &L) -> Option<Time> {
        Graph::time_between(self, src, dest)
    }
}

fn parse_weight(cell: &str, row: usize, column: usize) -> Result<Time, ParseError> {
    let trimmed = cell.trim();
    trimmed
        .parse::<Time>()
        .map_err(|source| ParseError::InvalidWeight {
            row,
            column,
            value: trimmed.to_string(),
            source,
        })
}

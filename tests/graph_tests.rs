//! Graph construction tests against the public API.

use delivery_planner::error::ParseError;
use delivery_planner::graph::Graph;
use delivery_planner::matrix_io::parse_matrix_text;
use delivery_planner::traits::NoopObserver;

fn build(text: &str) -> Result<Graph<String>, ParseError> {
    Graph::from_matrix(&parse_matrix_text(text), &mut NoopObserver)
}

fn loc(label: &str) -> String {
    label.to_string()
}

#[test]
fn test_symmetric_entries_give_symmetric_lookups() {
    let graph = build("A,B,C\n0,5,0\n5,0,3\n0,3,0\n").unwrap();

    assert_eq!(graph.time_between(&loc("A"), &loc("B")), Some(5));
    assert_eq!(graph.time_between(&loc("B"), &loc("A")), Some(5));
    assert_eq!(graph.time_between(&loc("B"), &loc("C")), Some(3));
    assert_eq!(graph.time_between(&loc("C"), &loc("B")), Some(3));
}

#[test]
fn test_lookup_is_direct_edge_only() {
    let graph = build("A,B,C\n0,5,0\n5,0,3\n0,3,0\n").unwrap();

    // A reaches C through B, but there is no direct edge.
    assert_eq!(graph.time_between(&loc("A"), &loc("C")), None);
    assert_eq!(graph.time_between(&loc("A"), &loc("A")), None);
}

#[test]
fn test_locations_keep_declaration_order() {
    let graph = build("C,A,B\n0,0,0\n0,0,0\n0,0,0\n").unwrap();
    assert_eq!(graph.locations(), &[loc("C"), loc("A"), loc("B")]);
}

#[test]
fn test_diagonal_entry_is_a_self_edge() {
    let graph = build("A,B\n2,0\n0,0\n").unwrap();
    assert_eq!(graph.time_between(&loc("A"), &loc("A")), Some(2));
}

#[test]
fn test_negative_weight_is_not_rejected() {
    let graph = build("A,B\n0,-1\n-1,0\n").unwrap();
    assert_eq!(graph.time_between(&loc("A"), &loc("B")), Some(-1));
}

#[test]
fn test_too_few_rows() {
    let err = build("A,B,C\n0,1,0\n1,0,0\n").unwrap_err();
    assert_eq!(err, ParseError::RowCount { expected: 3, found: 2 });
}

#[test]
fn test_too_many_rows() {
    let err = build("A\n0\n0\n").unwrap_err();
    assert_eq!(err, ParseError::RowCount { expected: 1, found: 2 });
}

#[test]
fn test_long_row() {
    let err = build("A,B\n0,1,2\n1,0\n").unwrap_err();
    assert_eq!(
        err,
        ParseError::RowLength {
            row: 1,
            expected: 2,
            found: 3
        }
    );
}

#[test]
fn test_fractional_weight_is_rejected() {
    let err = build("A,B\n0,1.5\n1,0\n").unwrap_err();
    assert!(matches!(err, ParseError::InvalidWeight { row: 1, column: 1, .. }));
    assert!(err.to_string().contains("1.5"));
}

#[test]
fn test_empty_text_has_no_location_row() {
    let err = build("").unwrap_err();
    assert_eq!(err, ParseError::MissingLocationRow);
}

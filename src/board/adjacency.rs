//! Adjacency graph for the woodland map.
//!
//! The map is stored as an undirected edge list; per-clearing neighbor lists
//! are derived from it at compile time so both views always agree.

use super::clearing::{ClearingId, CLEARING_COUNT};

/// Number of undirected edges on the map.
pub const EDGE_COUNT: usize = 18;

/// Every undirected edge, smaller id first.
pub const EDGES: [(ClearingId, ClearingId); EDGE_COUNT] = [
    (0, 1),
    (0, 3),
    (0, 4),
    (1, 2),
    (2, 3),
    (2, 7),
    (3, 5),
    (4, 5),
    (4, 8),
    (5, 6),
    (5, 8),
    (5, 10),
    (6, 7),
    (6, 11),
    (7, 11),
    (8, 9),
    (9, 10),
    (10, 11),
];

/// The most neighbors any clearing has.
pub const MAX_DEGREE: usize = 5;

/// Neighbor lists derived from `EDGES`. Unused entries are `CLEARING_COUNT`.
const NEIGHBORS: [([ClearingId; MAX_DEGREE], usize); CLEARING_COUNT] = build_neighbors();

const fn build_neighbors() -> [([ClearingId; MAX_DEGREE], usize); CLEARING_COUNT] {
    let mut table = [([CLEARING_COUNT; MAX_DEGREE], 0usize); CLEARING_COUNT];
    let mut i = 0;
    while i < EDGE_COUNT {
        let (a, b) = EDGES[i];
        table[a].0[table[a].1] = b;
        table[a].1 += 1;
        table[b].0[table[b].1] = a;
        table[b].1 += 1;
        i += 1;
    }
    table
}

/// Returns the clearings adjacent to `clearing`. Empty for an invalid id.
pub fn adjacent_to(clearing: ClearingId) -> &'static [ClearingId] {
    match NEIGHBORS.get(clearing) {
        Some((list, len)) => &list[..*len],
        None => &[],
    }
}

/// Returns true if the two clearings share an edge.
pub fn is_adjacent(a: ClearingId, b: ClearingId) -> bool {
    adjacent_to(a).contains(&b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_is_symmetric() {
        for a in 0..CLEARING_COUNT {
            for &b in adjacent_to(a) {
                assert!(is_adjacent(b, a), "{} -> {} not symmetric", a, b);
            }
        }
    }

    #[test]
    fn degree_sum_matches_edge_count() {
        let total: usize = (0..CLEARING_COUNT).map(|c| adjacent_to(c).len()).sum();
        assert_eq!(total, EDGE_COUNT * 2);
    }

    #[test]
    fn neighbor_lists_match_map() {
        let mut n5 = adjacent_to(5).to_vec();
        n5.sort_unstable();
        assert_eq!(n5, vec![3, 4, 6, 8, 10]);

        let mut n9 = adjacent_to(9).to_vec();
        n9.sort_unstable();
        assert_eq!(n9, vec![8, 10]);
    }

    #[test]
    fn no_self_loops() {
        for c in 0..CLEARING_COUNT {
            assert!(!is_adjacent(c, c));
        }
    }

    #[test]
    fn invalid_clearing_has_no_neighbors() {
        assert!(adjacent_to(CLEARING_COUNT).is_empty());
        assert!(!is_adjacent(0, 99));
    }

    #[test]
    fn opposite_corners_not_adjacent() {
        assert!(!is_adjacent(0, 11));
        assert!(!is_adjacent(0, 7));
    }
}

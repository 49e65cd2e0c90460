//! Greedy insertion tour construction for the planar Euclidean TSP.
//!
//! A tour is grown from a one- or two-vertex seed by repeatedly inserting one
//! unvisited vertex. Each round's search over the unvisited vertices is split
//! across a rayon pool and reduced under a total order, so the same input and
//! policy always give the same tour regardless of the number of workers.
//!
//! ```
//! use tsp_insertion::{construct, Policy};
//!
//! let square = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
//! let tour = construct(&square, Policy::Cheapest).unwrap();
//! assert_eq!(tour.seq(), &[0, 3, 2, 1]);
//! ```

mod construct;
mod distance;
mod error;
pub mod io;
pub mod logging;
mod metrics;
pub mod options;
mod selector;
mod tour;

pub type NodeId = usize;

pub use construct::{construct, ConstructionDriver, Constructor, Phase, Policy};
pub use distance::{d_pt, DistanceMatrix, Point};
pub use error::{Error, Result};
pub use metrics::TourMetrics;
pub use options::Options;
pub use selector::{
    best_position, farthest_pair, CheapestInsertion, FarthestInsertion, InsertionCandidate,
    InsertionPolicy, Seed,
};
pub use tour::{Tour, TourState};

#[cfg(test)]
mod tests {
    use crate::*;

    pub(crate) const POINTS: [Point; 10] = [
        (95.0129, 61.5432),
        (23.1139, 79.1937),
        (60.6843, 92.1813),
        (48.5982, 73.8207),
        (89.1299, 17.6266),
        (76.2097, 40.5706),
        (45.6468, 93.5470),
        (1.8504 , 91.6904),
        (82.1407, 41.0270),
        (44.4703, 89.3650),
    ];

    #[test]
    fn cheapest_and_farthest_close_the_cycle() {
        for policy in [Policy::Cheapest, Policy::Farthest] {
            let tour = construct(&POINTS, policy).unwrap();
            let closed: Vec<NodeId> = tour.closed().collect();
            assert_eq!(closed.len(), POINTS.len() + 1);
            assert_eq!(closed.first(), closed.last());
        }
    }

    #[test]
    fn insertion_never_beats_triangle_inequality_bound() {
        // any Hamiltonian cycle is at least twice the farthest pair distance
        let m = DistanceMatrix::build(&POINTS).unwrap();
        let (a, b) = farthest_pair(&m).unwrap();
        for policy in [Policy::Cheapest, Policy::Farthest] {
            let tour = Constructor::new(policy).run_with_matrix(&m).unwrap();
            assert!(tour.length(&m) >= 2.0 * m.d_ix(a, b) - 1e-9);
        }
    }
}

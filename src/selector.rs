use std::cmp::Ordering;

use rayon::prelude::*;

use crate::{DistanceMatrix, Error, NodeId, Result, TourState};

/// One round's winner: insert `vertex` at index `position` of the tour sequence.
///
/// `cost` is whatever the policy ranked vertices by: the marginal length
/// increase for cheapest insertion, the distance to the nearest tour vertex
/// for farthest insertion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InsertionCandidate {
    pub vertex: NodeId,
    pub position: usize,
    pub cost: f64,
}

/// Initial partial tour a policy starts from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seed {
    Single(NodeId),
    Pair(NodeId, NodeId),
}

impl Seed {
    pub fn size(self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Pair(..) => 2,
        }
    }
}

/// Strategy plugged into the construction loop.
///
/// `select` runs inside whatever rayon pool the caller installed and must not
/// depend on that pool's size for its result.
pub trait InsertionPolicy: Sync {
    fn name(&self) -> &'static str;

    fn min_points(&self) -> usize;

    fn seed(&self, m: &DistanceMatrix) -> Result<Seed>;

    fn select(&self, tour: &TourState, m: &DistanceMatrix) -> Result<InsertionCandidate>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CheapestInsertion;

impl InsertionPolicy for CheapestInsertion {
    fn name(&self) -> &'static str {
        "cheapest"
    }

    fn min_points(&self) -> usize {
        1
    }

    fn seed(&self, m: &DistanceMatrix) -> Result<Seed> {
        if m.n() < self.min_points() {
            return Err(Error::precondition("cannot seed an empty instance"));
        }
        Ok(Seed::Single(0))
    }

    fn select(&self, tour: &TourState, m: &DistanceMatrix) -> Result<InsertionCandidate> {
        ensure_seeded(tour)?;
        reduce_unvisited(tour, Goal::Min, |v| {
            best_position(tour, m, v).map(|(position, cost)| InsertionCandidate {
                vertex: v,
                position,
                cost,
            })
        })
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FarthestInsertion;

impl InsertionPolicy for FarthestInsertion {
    fn name(&self) -> &'static str {
        "farthest"
    }

    fn min_points(&self) -> usize {
        2
    }

    fn seed(&self, m: &DistanceMatrix) -> Result<Seed> {
        let (a, b) = farthest_pair(m)?;
        Ok(Seed::Pair(a, b))
    }

    fn select(&self, tour: &TourState, m: &DistanceMatrix) -> Result<InsertionCandidate> {
        ensure_seeded(tour)?;
        let seq = tour.seq();
        let farthest = reduce_unvisited(tour, Goal::Max, |v| {
            seq.iter()
                .map(|&t| m.d_ix(v, t))
                .reduce(f64::min)
                .map(|nearest| InsertionCandidate {
                    vertex: v,
                    position: 0,
                    cost: nearest,
                })
        })?;

        let (position, increase) = best_position(tour, m, farthest.vertex)
            .ok_or_else(|| Error::precondition("tour has no edges to insert into"))?;
        log::trace!(
            "select.farthest: vertex={} nearest={:.3} position={position} increase={increase:.3}",
            farthest.vertex,
            farthest.cost
        );

        Ok(InsertionCandidate {
            position,
            ..farthest
        })
    }
}

/// Cheapest place to put `v`: the edge `(cur, next)` minimising
/// `d[cur][v] + d[v][next] - d[cur][next]`, returned as the sequence index
/// `v` would occupy together with that increase. Earlier edges win ties.
pub fn best_position(tour: &TourState, m: &DistanceMatrix, v: NodeId) -> Option<(usize, f64)> {
    tour.edges()
        .map(|(pos, cur, next)| {
            let increase = m.d_ix(cur, v) + m.d_ix(v, next) - m.d_ix(cur, next);
            (pos + 1, increase)
        })
        .reduce(|best, c| if c.1 < best.1 { c } else { best })
}

/// Pair `(i, j)`, `i < j`, at maximum distance. Scans sequentially from `(0, 1)`
/// and only moves on strictly greater distances, so the lexicographically
/// smallest pair wins ties.
pub fn farthest_pair(m: &DistanceMatrix) -> Result<(NodeId, NodeId)> {
    let n = m.n();
    if n < 2 {
        return Err(Error::precondition(format!(
            "farthest pair needs at least 2 vertices, got {n}"
        )));
    }

    let mut best = (0, 1, m.d_ix(0, 1));
    for i in 0..n {
        let row = m.row(i);
        for (j, &d) in row.iter().enumerate().skip(i + 1) {
            if d > best.2 {
                best = (i, j, d);
            }
        }
    }

    log::debug!(
        "seed.farthest_pair: a={} b={} dist={:.3}",
        best.0,
        best.1,
        best.2
    );
    Ok((best.0, best.1))
}

#[derive(Clone, Copy, Debug)]
enum Goal {
    Min,
    Max,
}

/// Total order on candidates: cost in the direction of `goal`, then the lower
/// vertex id. Associative, so any grouping of partial results folds to the
/// same winner.
fn prefer(a: InsertionCandidate, b: InsertionCandidate, goal: Goal) -> InsertionCandidate {
    let by_cost = match goal {
        Goal::Min => a.cost.total_cmp(&b.cost),
        Goal::Max => b.cost.total_cmp(&a.cost),
    };
    match by_cost.then(a.vertex.cmp(&b.vertex)) {
        Ordering::Greater => b,
        _ => a,
    }
}

/// Fork-join search over the unvisited vertices.
///
/// The unvisited list is cut into one contiguous partition per pool thread;
/// each partition folds to a local best, and the local bests are then folded
/// in partition order under `prefer`.
fn reduce_unvisited<F>(tour: &TourState, goal: Goal, eval: F) -> Result<InsertionCandidate>
where
    F: Fn(NodeId) -> Option<InsertionCandidate> + Sync,
{
    let unvisited = tour.unvisited();
    if unvisited.is_empty() {
        return Err(Error::EmptySearchSpace);
    }

    let workers = rayon::current_num_threads().max(1);
    let chunk = unvisited.len().div_ceil(workers);

    let local_bests: Vec<InsertionCandidate> = unvisited
        .par_chunks(chunk)
        .filter_map(|part| {
            part.iter()
                .filter_map(|&v| eval(v))
                .reduce(|a, b| prefer(a, b, goal))
        })
        .collect();

    local_bests
        .into_iter()
        .reduce(|a, b| prefer(a, b, goal))
        .ok_or(Error::EmptySearchSpace)
}

fn ensure_seeded(tour: &TourState) -> Result<()> {
    if tour.size() == 0 {
        return Err(Error::precondition("selection on an unseeded tour"));
    }
    Ok(())
}

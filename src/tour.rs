use crate::{DistanceMatrix, Error, NodeId, Result};

/// Partial cycle under construction.
///
/// `visited[v]` is true exactly when `v` appears in `seq`. The last vertex of
/// `seq` connects back to the first.
#[derive(Clone, Debug)]
pub struct TourState {
    n: usize,
    seq: Vec<NodeId>,
    visited: Vec<bool>,
}

impl TourState {
    pub fn new(n: usize) -> Result<Self> {
        let mut seq = Vec::new();
        seq.try_reserve_exact(n)?;
        let mut visited = Vec::new();
        visited.try_reserve_exact(n)?;
        visited.resize(n, false);
        Ok(Self { n, seq, visited })
    }

    pub fn seed_single(&mut self, v: NodeId) -> Result<()> {
        self.ensure_empty()?;
        self.mark(v)?;
        self.seq.push(v);
        Ok(())
    }

    pub fn seed_pair(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        self.ensure_empty()?;
        if a == b {
            return Err(Error::precondition(format!("seed pair repeats vertex {a}")));
        }
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        self.mark(a)?;
        self.mark(b)?;
        self.seq.extend([a, b]);
        Ok(())
    }

    /// Inserts `v` before the element currently at `pos`; `pos == size` appends.
    pub fn insert_at(&mut self, v: NodeId, pos: usize) -> Result<()> {
        if pos > self.seq.len() {
            return Err(Error::precondition(format!(
                "insert position {pos} out of range for tour of size {}",
                self.seq.len()
            )));
        }
        self.mark(v)?;
        self.seq.insert(pos, v);
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.seq.len() == self.n
    }

    /// Tour edge leaving `pos`: `(seq[pos], seq[(pos + 1) % size])`.
    pub fn neighbors_of(&self, pos: usize) -> Result<(NodeId, NodeId)> {
        let size = self.seq.len();
        if pos >= size {
            return Err(Error::precondition(format!(
                "edge position {pos} out of range for tour of size {size}"
            )));
        }
        Ok((self.seq[pos], self.seq[(pos + 1) % size]))
    }

    /// Every tour edge as `(pos, current, next)`, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (usize, NodeId, NodeId)> + '_ {
        let size = self.seq.len();
        self.seq
            .iter()
            .enumerate()
            .map(move |(pos, &cur)| (pos, cur, self.seq[(pos + 1) % size]))
    }

    pub fn unvisited(&self) -> Vec<NodeId> {
        (0..self.n).filter(|&v| !self.visited[v]).collect()
    }

    pub fn is_visited(&self, v: NodeId) -> bool {
        self.visited.get(v).copied().unwrap_or(false)
    }

    pub fn size(&self) -> usize {
        self.seq.len()
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn seq(&self) -> &[NodeId] {
        &self.seq
    }

    pub fn into_tour(self, rounds: usize) -> Tour {
        Tour {
            seq: self.seq,
            rounds,
        }
    }

    fn ensure_empty(&self) -> Result<()> {
        if self.seq.is_empty() {
            Ok(())
        } else {
            Err(Error::precondition(format!(
                "seeding a tour that already holds {} vertices",
                self.seq.len()
            )))
        }
    }

    fn check_vertex(&self, v: NodeId) -> Result<()> {
        if v < self.n {
            Ok(())
        } else {
            Err(Error::precondition(format!(
                "vertex {v} out of range for n={}",
                self.n
            )))
        }
    }

    fn mark(&mut self, v: NodeId) -> Result<()> {
        self.check_vertex(v)?;
        if self.visited[v] {
            return Err(Error::precondition(format!("vertex {v} already in tour")));
        }
        self.visited[v] = true;
        Ok(())
    }
}

/// Completed Hamiltonian cycle over all input vertices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tour {
    seq: Vec<NodeId>,
    rounds: usize,
}

impl Tour {
    pub fn seq(&self) -> &[NodeId] {
        &self.seq
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Number of insertion rounds run after seeding.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Vertices in visiting order, ending with a return to the start.
    pub fn closed(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.seq.iter().chain(self.seq.first()).copied()
    }

    /// Lengths of every cycle edge, the closing edge last.
    pub fn edge_lengths(&self, m: &DistanceMatrix) -> Vec<f64> {
        let n = self.seq.len();
        (0..n)
            .map(|i| m.d_ix(self.seq[i], self.seq[(i + 1) % n]))
            .collect()
    }

    pub fn length(&self, m: &DistanceMatrix) -> f64 {
        self.edge_lengths(m).iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_single_marks_vertex() {
        let mut t = TourState::new(3).unwrap();
        t.seed_single(1).unwrap();
        assert_eq!(t.seq(), &[1]);
        assert!(t.is_visited(1));
        assert_eq!(t.unvisited(), vec![0, 2]);
        assert_eq!(t.neighbors_of(0).unwrap(), (1, 1));
    }

    #[test]
    fn seed_pair_rejects_repeats_and_reseeding() {
        let mut t = TourState::new(3).unwrap();
        assert!(matches!(
            t.seed_pair(2, 2),
            Err(Error::PreconditionViolation(_))
        ));
        t.seed_pair(0, 2).unwrap();
        assert!(matches!(
            t.seed_single(1),
            Err(Error::PreconditionViolation(_))
        ));
        assert_eq!(t.size(), 2);
    }

    #[test]
    fn insert_at_shifts_and_grows_by_one() {
        let mut t = TourState::new(4).unwrap();
        t.seed_pair(0, 3).unwrap();
        t.insert_at(1, 1).unwrap();
        assert_eq!(t.seq(), &[0, 1, 3]);
        t.insert_at(2, 3).unwrap();
        assert_eq!(t.seq(), &[0, 1, 3, 2]);
        assert!(t.is_complete());
        assert!(t.unvisited().is_empty());
    }

    #[test]
    fn insert_at_rejects_visited_and_out_of_range() {
        let mut t = TourState::new(4).unwrap();
        t.seed_single(0).unwrap();
        assert!(matches!(
            t.insert_at(0, 1),
            Err(Error::PreconditionViolation(_))
        ));
        assert!(matches!(
            t.insert_at(1, 2),
            Err(Error::PreconditionViolation(_))
        ));
        assert!(matches!(
            t.insert_at(9, 0),
            Err(Error::PreconditionViolation(_))
        ));
        assert_eq!(t.size(), 1);
        assert!(!t.is_visited(1));
    }

    #[test]
    fn edges_wrap_around() {
        let mut t = TourState::new(3).unwrap();
        t.seed_pair(2, 0).unwrap();
        t.insert_at(1, 2).unwrap();
        let edges: Vec<_> = t.edges().collect();
        assert_eq!(edges, vec![(0, 2, 0), (1, 0, 1), (2, 1, 2)]);
        assert_eq!(t.neighbors_of(2).unwrap(), (1, 2));
        assert!(t.neighbors_of(3).is_err());
    }

    #[test]
    fn closed_repeats_start() {
        let mut t = TourState::new(3).unwrap();
        t.seed_pair(1, 2).unwrap();
        t.insert_at(0, 2).unwrap();
        let tour = t.into_tour(1);
        assert_eq!(tour.closed().collect::<Vec<_>>(), vec![1, 2, 0, 1]);
        assert_eq!(tour.rounds(), 1);
    }
}

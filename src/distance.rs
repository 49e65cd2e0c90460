use rayon::prelude::*;

use crate::{Error, NodeId, Result};

/// Planar coordinate pair `(x, y)`. A point's index in the input is its vertex id.
pub type Point = (f64, f64);

pub fn d_pt(s: &Point, t: &Point) -> f64 {
    let dx = s.0 - t.0;
    let dy = s.1 - t.1;
    (dx * dx + dy * dy).sqrt()
}

/// Dense symmetric table of pairwise Euclidean distances, stored row-major.
///
/// Built once per run and only read afterwards, so selection workers share it
/// by reference without any locking.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    m: Vec<f64>,
}

impl DistanceMatrix {
    pub fn build(p: &[Point]) -> Result<Self> {
        let n = p.len();
        let len = n.checked_mul(n).ok_or_else(|| {
            Error::Allocation(format!("{n}x{n} distance matrix overflows usize"))
        })?;

        let mut m: Vec<f64> = Vec::new();
        m.try_reserve_exact(len)?;
        m.resize(len, 0.0);

        if n > 0 {
            m.par_chunks_mut(n).enumerate().for_each(|(i, row)| {
                for (j, d) in row.iter_mut().enumerate() {
                    // dx and dy only flip sign when i and j swap, so d[i][j] == d[j][i] bit for bit
                    *d = if i == j { 0.0 } else { d_pt(&p[i], &p[j]) };
                }
            });
        }

        log::debug!("distance: built n={n} entries={len}");
        Ok(Self { n, m })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn d_ix(&self, i: NodeId, j: NodeId) -> f64 {
        self.m[i * self.n + j]
    }

    pub fn row(&self, i: NodeId) -> &[f64] {
        &self.m[i * self.n..(i + 1) * self.n]
    }
}

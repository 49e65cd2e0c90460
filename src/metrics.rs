use statrs::statistics::{Data, Distribution, Max};

use crate::{DistanceMatrix, Tour};

/// Edge-length summary of a finished cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TourMetrics {
    pub total: f64,
    pub longest: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl TourMetrics {
    pub fn measure(tour: &Tour, m: &DistanceMatrix) -> Self {
        let n = tour.len();
        if n < 2 {
            log::info!("metrics: n={n} so there's nothing to report");
            return Self::default();
        }

        let lengths = tour.edge_lengths(m);
        let total = lengths.iter().sum();
        let data = Data::new(lengths);
        let metrics = Self {
            total,
            longest: data.max(),
            mean: data.mean().unwrap_or(0.0),
            std_dev: data.std_dev().unwrap_or(0.0),
        };

        log::info!(
            "metrics: n={n} total={:.3} longest={:.3} avg={:.3} stdev={:.3}",
            metrics.total,
            metrics.longest,
            metrics.mean,
            metrics.std_dev
        );
        metrics
    }
}

use std::{fmt, time::Instant};

use crate::{
    CheapestInsertion, DistanceMatrix, Error, FarthestInsertion, InsertionCandidate,
    InsertionPolicy, Point, Result, Seed, Tour, TourState,
};

/// Heuristic used to grow the tour, chosen once per run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Policy {
    #[default]
    Cheapest,
    Farthest,
}

impl Policy {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cheapest" | "cheapest-insertion" => Ok(Self::Cheapest),
            "farthest" | "farthest-insertion" => Ok(Self::Farthest),
            other => Err(Error::invalid_input(format!(
                "Invalid value for --policy: {other} (expected cheapest|farthest)"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Cheapest => CheapestInsertion.name(),
            Self::Farthest => FarthestInsertion.name(),
        }
    }

    pub fn min_points(self) -> usize {
        match self {
            Self::Cheapest => CheapestInsertion.min_points(),
            Self::Farthest => FarthestInsertion.min_points(),
        }
    }

    fn check_points(self, n: usize) -> Result<()> {
        if n < self.min_points() {
            return Err(Error::Configuration {
                policy: self.name(),
                required: self.min_points(),
                found: n,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    Empty,
    Seeded,
    Growing,
    Complete,
}

/// Runs one policy from an empty tour to a Hamiltonian cycle.
///
/// The driver owns the [`TourState`]. Each [`step`](Self::step) lends it
/// immutably to the policy's parallel search, and only after the search has
/// reduced to a single candidate is the tour mutated.
pub struct ConstructionDriver<'a, P> {
    policy: P,
    matrix: &'a DistanceMatrix,
    tour: TourState,
    phase: Phase,
    rounds: usize,
}

impl<'a, P: InsertionPolicy> ConstructionDriver<'a, P> {
    pub fn new(policy: P, matrix: &'a DistanceMatrix) -> Result<Self> {
        let n = matrix.n();
        if n < policy.min_points() {
            return Err(Error::Configuration {
                policy: policy.name(),
                required: policy.min_points(),
                found: n,
            });
        }

        Ok(Self {
            tour: TourState::new(n)?,
            policy,
            matrix,
            phase: Phase::Empty,
            rounds: 0,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn tour(&self) -> &TourState {
        &self.tour
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn seed(&mut self) -> Result<Seed> {
        if self.phase != Phase::Empty {
            return Err(Error::precondition(format!(
                "seeding in phase {:?}",
                self.phase
            )));
        }

        let seed = self.policy.seed(self.matrix)?;
        match seed {
            Seed::Single(v) => self.tour.seed_single(v)?,
            Seed::Pair(a, b) => self.tour.seed_pair(a, b)?,
        }
        log::debug!(
            "construct.seed: policy={} seed={seed:?} size={}",
            self.policy.name(),
            seed.size()
        );
        self.transition(if self.tour.is_complete() {
            Phase::Complete
        } else {
            Phase::Seeded
        });
        Ok(seed)
    }

    /// Runs one selection round and applies its winner.
    pub fn step(&mut self) -> Result<InsertionCandidate> {
        if !matches!(self.phase, Phase::Seeded | Phase::Growing) {
            return Err(Error::precondition(format!(
                "insertion round in phase {:?}",
                self.phase
            )));
        }

        let before = self.tour.size();
        let candidate = self.policy.select(&self.tour, self.matrix)?;
        self.tour.insert_at(candidate.vertex, candidate.position)?;
        if self.tour.size() != before + 1 {
            return Err(Error::precondition(format!(
                "tour grew from {before} to {}",
                self.tour.size()
            )));
        }
        self.rounds += 1;

        log::trace!(
            "construct.round: idx={} vertex={} position={} cost={:.3} size={}",
            self.rounds,
            candidate.vertex,
            candidate.position,
            candidate.cost,
            self.tour.size()
        );

        self.transition(if self.tour.is_complete() {
            Phase::Complete
        } else {
            Phase::Growing
        });
        Ok(candidate)
    }

    pub fn run(mut self) -> Result<Tour> {
        if self.phase == Phase::Empty {
            self.seed()?;
        }
        while self.phase != Phase::Complete {
            self.step()?;
        }
        Ok(self.tour.into_tour(self.rounds))
    }

    fn transition(&mut self, next: Phase) {
        if next != self.phase {
            log::debug!(
                "construct.phase: {:?} -> {next:?} size={}",
                self.phase,
                self.tour.size()
            );
            self.phase = next;
        }
    }
}

/// Entry point: points and policy in, finished tour out.
///
/// Every run gets its own rayon pool of `threads` workers (0 picks rayon's
/// default). The resulting tour does not depend on the worker count.
#[derive(Clone, Copy, Debug, Default)]
pub struct Constructor {
    policy: Policy,
    threads: usize,
}

impl Constructor {
    pub fn new(policy: Policy) -> Self {
        Self { policy, threads: 0 }
    }

    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn run(&self, points: &[Point]) -> Result<Tour> {
        self.policy.check_points(points.len())?;
        let matrix = DistanceMatrix::build(points)?;
        self.run_with_matrix(&matrix)
    }

    pub fn run_with_matrix(&self, matrix: &DistanceMatrix) -> Result<Tour> {
        self.policy.check_points(matrix.n())?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()?;
        let now = Instant::now();

        log::info!(
            "construct: start n={} policy={} threads={}",
            matrix.n(),
            self.policy,
            pool.current_num_threads()
        );

        let tour = pool.install(|| match self.policy {
            Policy::Cheapest => ConstructionDriver::new(CheapestInsertion, matrix)?.run(),
            Policy::Farthest => ConstructionDriver::new(FarthestInsertion, matrix)?.run(),
        })?;

        log::info!(
            "construct: complete n={} rounds={} length={:.3} time={:.3}s",
            tour.len(),
            tour.rounds(),
            tour.length(matrix),
            now.elapsed().as_secs_f32()
        );
        Ok(tour)
    }
}

pub fn construct(points: &[Point], policy: Policy) -> Result<Tour> {
    Constructor::new(policy).run(points)
}

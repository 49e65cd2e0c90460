use std::{fs::File, path::Path};

use tsp_insertion::{io, Constructor, DistanceMatrix, Point, Policy, Tour};

struct Lcg {
    x: u64,
}

impl Lcg {
    const A: u64 = 1103515245;
    const C: u64 = 12345;

    fn new(seed: u64) -> Self {
        Lcg { x: seed }
    }

    fn gen(&mut self) -> u64 {
        self.x = Self::A.wrapping_mul(self.x).wrapping_add(Self::C);
        self.x >> 16
    }
}

/// Points on a small integer grid, so equal costs and coincident points are common.
fn grid_points(n: usize, side: u64, seed: u64) -> Vec<Point> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|_| ((rng.gen() % side) as f64, (rng.gen() % side) as f64))
        .collect()
}

fn assert_permutation(tour: &Tour, n: usize) {
    let mut seen = tour.seq().to_vec();
    seen.sort_unstable();
    assert_eq!(seen, (0..n).collect::<Vec<_>>());
}

fn seed_size(policy: Policy) -> usize {
    match policy {
        Policy::Cheapest => 1,
        Policy::Farthest => 2,
    }
}

#[test]
fn sample_file_end_to_end() {
    let points = File::open(Path::new("tests/data/sample.txt"))
        .map_err(Into::into)
        .and_then(io::read_points)
        .unwrap();
    assert_eq!(points.len(), 10);

    for policy in [Policy::Cheapest, Policy::Farthest] {
        let tour = Constructor::new(policy).run(&points).unwrap();
        assert_permutation(&tour, points.len());

        let mut out = Vec::new();
        io::write_tour(&tour, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("11"));
        let ids: Vec<usize> = lines
            .next()
            .unwrap()
            .split(' ')
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(ids.len(), 11);
        assert_eq!(ids[0], ids[10]);
        assert_eq!(&ids[..10], tour.seq());
    }
}

#[test]
fn grid_instances_are_permutations_with_expected_rounds() {
    for (n, seed) in [(2, 1), (3, 2), (17, 3), (120, 4)] {
        let points = grid_points(n, 12, seed);
        for policy in [Policy::Cheapest, Policy::Farthest] {
            let tour = Constructor::new(policy).run(&points).unwrap();
            assert_permutation(&tour, n);
            assert_eq!(tour.rounds(), n - seed_size(policy));
        }
    }
}

#[test]
fn worker_count_does_not_change_the_tour() {
    let points = grid_points(250, 15, 4234);
    let m = DistanceMatrix::build(&points).unwrap();

    for policy in [Policy::Cheapest, Policy::Farthest] {
        let baseline = Constructor::new(policy)
            .threads(1)
            .run_with_matrix(&m)
            .unwrap();
        for threads in [2, 3, 4, 7, 8] {
            let tour = Constructor::new(policy)
                .threads(threads)
                .run_with_matrix(&m)
                .unwrap();
            assert_eq!(baseline, tour, "policy={policy} threads={threads}");
        }
    }
}

#[test]
fn coincident_points_still_give_a_full_tour() {
    let points = vec![(3.0, 3.0); 6];
    for policy in [Policy::Cheapest, Policy::Farthest] {
        let tour = Constructor::new(policy).threads(3).run(&points).unwrap();
        assert_permutation(&tour, 6);
        assert_eq!(tour.length(&DistanceMatrix::build(&points).unwrap()), 0.0);
    }
}

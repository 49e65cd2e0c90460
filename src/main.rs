use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    time::Instant,
};

use log::info;

use tsp_insertion::{
    io as tour_io, logging, Constructor, DistanceMatrix, Options, Result, TourMetrics,
};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = Options::from_args()?;
    logging::init_logger(&options)?;

    let points = match options.input_path() {
        Some(path) => tour_io::read_points(BufReader::new(File::open(path)?))?,
        None => tour_io::read_points(io::stdin().lock())?,
    };
    info!(
        "input: n={} policy={} threads={}",
        points.len(),
        options.policy,
        options.threads
    );

    let matrix = DistanceMatrix::build(&points)?;
    let tour = Constructor::new(options.policy)
        .threads(options.threads)
        .run_with_matrix(&matrix)?;

    match options.output_path() {
        Some(path) => tour_io::write_tour(&tour, BufWriter::new(File::create(path)?))?,
        None => tour_io::write_tour(&tour, io::stdout().lock())?,
    }

    TourMetrics::measure(&tour, &matrix);
    info!(
        "output: n={} time={:.2}s",
        tour.len(),
        now.elapsed().as_secs_f32()
    );

    Ok(())
}

use std::io::{Read, Write};

use crate::{Error, Point, Result, Tour};

pub fn read_points<R: Read>(mut reader: R) -> Result<Vec<Point>> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_points(&input)
}

/// Parses whitespace-separated `x,y` tokens.
pub fn parse_points(input: &str) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    for (idx, tok) in input.split_whitespace().enumerate() {
        let (x_s, y_s) = tok.split_once(',').ok_or_else(|| {
            Error::invalid_input(format!("Point {idx} is not in x,y form: {tok}"))
        })?;
        let x = parse_coord(idx, "x", x_s)?;
        let y = parse_coord(idx, "y", y_s)?;
        points.push((x, y));
    }
    log::debug!("input: parsed n={}", points.len());
    Ok(points)
}

fn parse_coord(idx: usize, axis: &str, raw: &str) -> Result<f64> {
    let v: f64 = raw.trim().parse().map_err(|_| {
        Error::invalid_input(format!("Point {idx} has an invalid {axis} coordinate: {raw}"))
    })?;
    if !v.is_finite() {
        return Err(Error::invalid_input(format!(
            "Point {idx} has a non-finite {axis} coordinate: {raw}"
        )));
    }
    Ok(v)
}

/// Writes `n + 1` on the first line, then the cycle with the start vertex repeated at the end.
pub fn write_tour<W: Write>(tour: &Tour, mut out: W) -> Result<()> {
    writeln!(out, "{}", tour.len() + 1)?;
    let line = tour
        .closed()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "{line}")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{construct, Policy};

    #[test]
    fn parses_lines_and_spaces() {
        let points = parse_points("0,0\n1.5,-2\n  3e1,4 \n").unwrap();
        assert_eq!(points, vec![(0.0, 0.0), (1.5, -2.0), (30.0, 4.0)]);
    }

    #[test]
    fn empty_input_yields_no_points() {
        assert!(parse_points(" \n\n").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_tokens() {
        let err = parse_points("0,0\n1;2\n").unwrap_err();
        assert!(err.to_string().contains("Point 1 is not in x,y form"));
        assert!(parse_points("a,1").is_err());
        assert!(parse_points("1,NaN").is_err());
    }

    #[test]
    fn reads_from_any_reader() {
        let points = read_points("1,2 3,4".as_bytes()).unwrap();
        assert_eq!(points, vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn writes_count_line_and_closed_tour() {
        let tour = construct(
            &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
            Policy::Cheapest,
        )
        .unwrap();
        let mut out = Vec::new();
        write_tour(&tour, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "5\n0 3 2 1 0\n");
    }
}

use std::{
    fmt, fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{bail, Context};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tsp_core::{DistanceMatrix, Error, Point};

use crate::args::Args;

const RANDOM_EXTENT: f64 = 100.0;

/// Where the instance came from, before it is turned into a matrix.
pub enum Input {
    Points(Vec<Point>),
    Matrix(DistanceMatrix),
}

impl Input {
    /// Reads or generates the instance. `max_points` is checked before any
    /// random points are generated.
    pub fn from_args(args: &Args, max_points: usize) -> anyhow::Result<Self> {
        if let Some(path) = &args.points {
            return Ok(Input::Points(parse_points(&read_source(path)?)?));
        }
        if let Some(path) = &args.matrix {
            let text = read_source(path)?;
            let matrix: DistanceMatrix = serde_json::from_str(&text)
                .with_context(|| format!("invalid distance matrix in {}", path.display()))?;
            return Ok(Input::Matrix(matrix));
        }
        if let Some(n) = args.random {
            if n > max_points {
                return Err(Error::too_many_points(n, max_points).into());
            }
            return Ok(Input::Points(random_points(n, args.seed)));
        }
        log::info!("input: no source given, using the five-city demo");
        Ok(Input::Points(demo_points()))
    }

    pub fn n(&self) -> usize {
        match self {
            Input::Points(points) => points.len(),
            Input::Matrix(matrix) => matrix.n(),
        }
    }

    pub fn into_matrix(self) -> tsp_core::Result<DistanceMatrix> {
        match self {
            Input::Points(points) => DistanceMatrix::from_points(&points),
            Input::Matrix(matrix) => Ok(matrix),
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Points(points) => write!(f, "points n={}", points.len()),
            Input::Matrix(matrix) => write!(f, "matrix n={}", matrix.n()),
        }
    }
}

/// The five cities the solver has always shipped as its worked example.
pub fn demo_points() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(2.0, 3.0),
        Point::new(5.0, 4.0),
        Point::new(1.0, 1.0),
        Point::new(4.0, 0.0),
    ]
}

pub fn random_points(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Point::new(
                rng.gen_range(0.0..RANDOM_EXTENT),
                rng.gen_range(0.0..RANDOM_EXTENT),
            )
        })
        .collect()
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// JSON array of points, or one `x,y` pair per line. Blank lines and `#`
/// comments are skipped in the line format.
pub fn parse_points(text: &str) -> anyhow::Result<Vec<Point>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("invalid JSON point list");
    }

    let mut points = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((x, y)) = line.split_once(',') else {
            bail!("line {}: expected \"x,y\", got {line:?}", idx + 1);
        };
        let x: f64 = x
            .trim()
            .parse()
            .with_context(|| format!("line {}: bad x coordinate", idx + 1))?;
        let y: f64 = y
            .trim()
            .parse()
            .with_context(|| format!("line {}: bad y coordinate", idx + 1))?;
        points.push(Point::new(x, y));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_point_list() {
        let points = parse_points(r#" [{"x": 1, "y": 2}, {"x": -3.5, "y": 0}] "#).unwrap();
        assert_eq!(points, vec![Point::new(1.0, 2.0), Point::new(-3.5, 0.0)]);
    }

    #[test]
    fn parses_csv_lines_with_comments() {
        let text = "# depot\n0,0\n\n 3.0 , 4.0 \n";
        let points = parse_points(text).unwrap();
        assert_eq!(points, vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);
    }

    #[test]
    fn reports_the_offending_line() {
        let err = parse_points("0,0\n1;2\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));

        let err = parse_points("0,0\nx,2\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn random_points_are_reproducible_and_in_range() {
        let a = random_points(8, 99);
        assert_eq!(a, random_points(8, 99));
        assert_ne!(a, random_points(8, 100));
        assert!(a
            .iter()
            .all(|p| (0.0..RANDOM_EXTENT).contains(&p.x) && (0.0..RANDOM_EXTENT).contains(&p.y)));
    }

    #[test]
    fn oversized_random_instance_is_rejected_before_generation() {
        use clap::Parser;

        let args = Args::try_parse_from(["tsp-dp", "--random", "2000000000"]).unwrap();
        let err = Input::from_args(&args, 20).err().unwrap();
        let err = err.downcast::<Error>().unwrap();
        assert!(err.is_resource_exhausted());
        assert!(err.to_string().contains("2000000000 points"));

        let args = Args::try_parse_from(["tsp-dp", "--random", "20"]).unwrap();
        assert_eq!(Input::from_args(&args, 20).unwrap().n(), 20);
    }

    #[test]
    fn demo_solves_to_known_cost() {
        let matrix = Input::Points(demo_points()).into_matrix().unwrap();
        let cost = tsp_dp::solve(&matrix).unwrap();
        assert!((cost - 14.935664825658925).abs() < 1e-9);
    }
}

use napi_derive::napi;
use tsp_core::{Error, Point, Result, SolverOptions, Strategy};

#[napi(object)]
#[derive(Clone, Copy, Debug)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl From<Coordinate> for Point {
    fn from(c: Coordinate) -> Self {
        Point::new(c.x, c.y)
    }
}

#[napi(object)]
#[derive(Clone, Debug, Default)]
pub struct SolveOptions {
    pub max_points: Option<u32>,
    /// "memoized" or "layered"
    pub strategy: Option<String>,
    pub threads: Option<u32>,
}

impl SolveOptions {
    pub fn into_solver_options(self) -> Result<SolverOptions> {
        let mut options = SolverOptions::default();
        if let Some(max_points) = self.max_points {
            options = options.with_max_points(max_points as usize);
        }
        if let Some(threads) = self.threads {
            options = options.with_threads(threads as usize);
        }
        if let Some(strategy) = self.strategy.as_deref() {
            options = options.with_strategy(match strategy {
                "memoized" => Strategy::Memoized,
                "layered" => Strategy::Layered,
                other => {
                    return Err(Error::invalid_input(format!(
                        "unknown strategy {other:?}, expected \"memoized\" or \"layered\""
                    )))
                }
            });
        }
        options.validate()?;
        Ok(options)
    }
}

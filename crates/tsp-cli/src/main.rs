mod args;
mod input;
mod logging;

use std::time::Instant;

use clap::Parser;
use log::{debug, info};
use tsp_dp::TspSolver;

use args::{Args, OutputFormat};
use input::Input;

fn main() -> anyhow::Result<()> {
    let now = Instant::now();
    let args = Args::parse();
    logging::init_logger(args.log_level.to_filter())?;

    let options = args.solver_options()?;
    let solver = TspSolver::new(options)?;
    let limit = solver.options().max_points;
    let input = Input::from_args(&args, limit)?;

    info!("input: {input}");
    info!("options: {}", solver.options());

    if input.n() > limit {
        return Err(tsp_core::Error::too_many_points(input.n(), limit).into());
    }

    let matrix = input.into_matrix()?;
    if args.print_matrix {
        debug!("distance matrix:\n{matrix}");
    }

    let report = solver.solve_report(&matrix)?;

    match args.format {
        OutputFormat::Text => println!("{}", text_line(report.cost)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    info!(
        "output: n={} states={} time={:.3}s",
        report.points,
        report.states_computed,
        now.elapsed().as_secs_f32()
    );

    Ok(())
}

fn text_line(cost: f64) -> String {
    format!("Minimum Tour Cost: {cost}")
}

//! tribune-layout - solve, validate and score a tribune scenario
//!
//! Loads a TOML scenario, solves the section and plan layout, runs the
//! validators and the fitness function, and prints a summary or a JSON
//! report.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use tribune_layout::analysis::{Analysis, AnalysisResult};
use tribune_layout::core::Result;
use tribune_layout::interchange::{PlanRecord, SerializedAnalysis};
use tribune_layout::optimization;
use tribune_layout::scenario::Scenario;
use tribune_layout::solver::TribuneSolution;
use tribune_layout::validation::{TribuneValidator, ValidationReport};

#[derive(Parser, Debug)]
#[command(name = "tribune-layout")]
#[command(about = "Parametric layout solver for stepped spectator tribunes")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve and validate a scenario
    Solve {
        scenario: PathBuf,

        /// Print the full report as JSON instead of a summary
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the fitness of a scenario
    Evaluate { scenario: PathBuf },
    /// Export the scenario's hall footprint as a plan record
    ExportPlan { scenario: PathBuf },
    /// Solve and export the analysis as JSON
    ExportAnalysis { scenario: PathBuf },
}

#[derive(Serialize)]
struct Report<'a> {
    solution: &'a TribuneSolution,
    analysis: &'a AnalysisResult,
    validation: &'a ValidationReport,
    fitness: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tribune_layout=info")),
        )
        .init();

    let args = Args::parse();
    match args.command {
        Command::Solve { scenario, json } => solve(&Scenario::load_from_file(&scenario)?, json),
        Command::Evaluate { scenario } => {
            let scenario = Scenario::load_from_file(&scenario)?;
            println!("{:.3}", optimization::evaluate(&scenario.candidate()));
            Ok(())
        }
        Command::ExportPlan { scenario } => {
            let scenario = Scenario::load_from_file(&scenario)?;
            let Some(hall) = &scenario.request.hall else {
                tracing::warn!("Scenario has no hall; nothing to export");
                return Ok(());
            };
            let record =
                PlanRecord::from_hall(scenario.request.origin, hall, scenario.config.tolerance);
            println!("{}", record.to_json()?);
            Ok(())
        }
        Command::ExportAnalysis { scenario } => {
            let scenario = Scenario::load_from_file(&scenario)?;
            let (solution, analysis) = solve_and_analyse(&scenario);
            println!("{}", SerializedAnalysis::new(&solution, &analysis).to_json()?);
            Ok(())
        }
    }
}

fn solve_and_analyse(scenario: &Scenario) -> (TribuneSolution, AnalysisResult) {
    let mut solution = scenario.solver().solve(&scenario.request);
    if let Some(existing) = &scenario.existing_tribune {
        solution = solution.with_existing_tribune(existing.clone());
    }
    let analysis = Analysis::with_config(scenario.config.clone()).calculate(
        &solution.audiences,
        &solution.tribune,
        scenario.screen(),
        scenario.projector(),
        &solution.audience_offsets,
    );
    (solution, analysis)
}

fn solve(scenario: &Scenario, json: bool) -> Result<()> {
    tracing::info!("Solving {} rows", scenario.tribune.rows());
    let (mut solution, analysis) = solve_and_analyse(scenario);
    let validation = TribuneValidator::with_config(scenario.config.clone()).validate(&solution);
    solution.record_validation(&validation);
    let fitness = optimization::evaluate(&scenario.candidate());

    if json {
        let report = Report {
            solution: &solution,
            analysis: &analysis,
            validation: &validation,
            fitness,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Rows:            {}", solution.tribune.rows());
    for (i, point) in solution.row_points().iter().enumerate() {
        let toggle = solution.railing_toggles().get(i).copied().unwrap_or(false);
        println!(
            "  row {:>3}  x={:>9.1}  z={:>7.1}  railing={}",
            i, point.x, point.z, toggle
        );
    }
    println!("Landings:        {:?}", validation.landing_lengths);
    println!("Railings:        {}", solution.section_railings.len());
    println!("Plan lines:      {}", solution.plan_tribune_lines.len());
    println!("Plan chairs:     {}", solution.plan_chairs.iter().map(Vec::len).sum::<usize>());
    println!("Sightlines:      {}", analysis.sightlines().count());
    println!(
        "C-values:        {}",
        if validation.c_values_evaluated() {
            "evaluated"
        } else {
            "not evaluated"
        }
    );
    println!("Fitness:         {:.3}", fitness);

    if solution.errors.is_empty() {
        println!("No issues found");
    } else {
        println!("Issues:");
        for message in &solution.errors {
            println!("  - {}", message);
        }
    }
    Ok(())
}

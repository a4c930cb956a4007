//! Microvasc command-line interface.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use nalgebra::DMatrix;

use microvasc_core::builder::build_from_topology;
use microvasc_core::units::barye_to_mmhg;
use microvasc_core::{BuildConfig, CircuitModel, ConfigDocument, LengthLaw, Topology};
use microvasc_parser::parse;
use microvasc_solver::{NetworkResults, ResultSet, SteadySolver, SvZeroDRunner, ZeroDSolver};

#[derive(Copy, Clone, ValueEnum)]
enum SolverKind {
    /// In-process steady nodal solver
    Steady,
    /// External svZeroD-compatible binary
    Svzerod,
}

#[derive(Parser)]
#[command(name = "microvasc")]
#[command(about = "Microvascular network to hemodynamic circuit pipeline", long_about = None)]
#[command(version)]
struct Cli {
    /// Input network file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write the solver config JSON to this path
    #[arg(long, value_name = "FILE")]
    config_out: Option<PathBuf>,

    /// Report time-averaged values (default)
    #[arg(long, overrides_with = "no_steady")]
    steady: bool,

    /// Report per-vessel ranges over the full time series
    #[arg(long, overrides_with = "steady")]
    no_steady: bool,

    /// Solver backend
    #[arg(long, value_enum, default_value_t = SolverKind::Steady)]
    solver: SolverKind,

    /// Path to the external solver binary
    #[arg(long, value_name = "BIN")]
    svzerod_path: Option<String>,

    /// Blood viscosity in poise
    #[arg(long)]
    viscosity: Option<f64>,

    /// Blood density in g/cm^3
    #[arg(long)]
    density: Option<f64>,

    /// Inflow rate at each network inlet in cm^3/s
    #[arg(long)]
    inflow: Option<f64>,

    /// Resistance at each network outlet in dyn·s/cm^5
    #[arg(long)]
    outflow_resistance: Option<f64>,

    /// Distal pressure behind each outlet in barye
    #[arg(long)]
    distal_pressure: Option<f64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(ref input) = cli.input {
        run_analysis(input, &cli)?;
    } else {
        println!("Microvasc - microvascular network hemodynamics");
        println!();
        println!("Usage: microvasc <network.txt> [options]");
        println!();
        println!("Options:");
        println!("  --solver <steady|svzerod>   Solver backend");
        println!("  --config-out <FILE>         Write the solver config JSON");
        println!("  --no-steady                 Report full-series ranges");
        println!("  -v, --verbose               Verbose output");
        println!("  -h, --help                  Show all options");
    }

    Ok(())
}

fn build_config(cli: &Cli) -> BuildConfig {
    let mut config = BuildConfig::default();
    if let Some(v) = cli.viscosity {
        config.simulation.viscosity = v;
    }
    if let Some(v) = cli.density {
        config.simulation.density = v;
    }
    if let Some(v) = cli.inflow {
        config.boundaries.inflow = v;
    }
    if let Some(v) = cli.outflow_resistance {
        config.boundaries.outflow_resistance = v;
    }
    if let Some(v) = cli.distal_pressure {
        config.boundaries.distal_pressure = v;
    }
    config
}

fn run_analysis(input: &PathBuf, cli: &Cli) -> Result<()> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("failed to read network file: {}", input.display()))?;

    let mut network = parse(&content).context("failed to parse network file")?;
    let filled = network.fill_lengths(&LengthLaw::default());

    let topology = Topology::classify(&network)?;

    if cli.verbose {
        println!("Network: {}", network.title());
        println!(
            "Segments: {} ({} declared)",
            network.num_segments(),
            network.declared_count()
        );
        println!("Estimated lengths: {filled}");
        println!("Boundary nodes: {}", network.boundary_nodes().len());
        println!(
            "Junctions: {} ({} inflows, {} outflows)",
            topology.num_junctions(),
            topology.inflows().len(),
            topology.outflows().len()
        );
        for p in topology.pruned() {
            println!(
                "  pruned node {} ({} inlet, {} outlet branches)",
                p.node,
                p.inlets.len(),
                p.outlets.len()
            );
        }
        println!();
    }

    let config = build_config(cli);
    let model = build_from_topology(&network, &topology, &config)?;

    if let Some(ref path) = cli.config_out {
        let json = ConfigDocument::from_model(&model).to_json_string()?;
        fs::write(path, json)
            .with_context(|| format!("failed to write config: {}", path.display()))?;
        println!("Wrote solver config to {}", path.display());
        println!();
    }

    let results = run_solver(cli, &model)?;
    print_results(&model, &results, !cli.no_steady)
}

fn run_solver(cli: &Cli, model: &CircuitModel) -> Result<ResultSet> {
    let results = match cli.solver {
        SolverKind::Steady => SteadySolver::new().simulate(model)?,
        SolverKind::Svzerod => {
            let runner = match cli.svzerod_path {
                Some(ref path) => SvZeroDRunner::with_executable(path.clone()),
                None => SvZeroDRunner::new(),
            };
            runner.simulate(model)?
        }
    };
    Ok(results)
}

fn print_results(model: &CircuitModel, results: &ResultSet, steady: bool) -> Result<()> {
    let queries = NetworkResults::new(model, results);
    let pressures = queries.network_pressures(steady)?;
    let flows = queries.network_flows(steady)?;
    let wss = queries.network_wss(steady)?;

    println!("Per-Vessel Hemodynamics");
    println!("=======================");
    println!();
    println!(
        "Model: {} ({} vessels, {} junctions, {} boundary conditions)",
        model.name(),
        model.num_vessels(),
        model.num_junctions(),
        model.boundary_conditions().len()
    );
    println!();

    if steady {
        print!("{:<16}", "Vessel");
        print!("{:>16}", "R (dyn·s/cm^5)");
        print!("{:>14}", "Pin (mmHg)");
        print!("{:>14}", "Pout (mmHg)");
        print!("{:>14}", "Q (cm^3/s)");
        print!("{:>16}", "WSS (dyn/cm^2)");
        println!();
        println!("{}", "-".repeat(90));

        for (row, vessel) in model.vessels().iter().enumerate() {
            print!("{:<16}", vessel.name);
            print!("{:>16.4e}", vessel.resistance);
            print!("{:>14.4}", barye_to_mmhg(pressures.inlet[(row, 0)]));
            print!("{:>14.4}", barye_to_mmhg(pressures.outlet[(row, 0)]));
            print!("{:>14.6}", flows[(row, 0)]);
            print!("{:>16.4e}", wss[(row, 0)]);
            println!();
        }
    } else {
        print!("{:<16}", "Vessel");
        print!("{:>26}", "Pin (mmHg)");
        print!("{:>26}", "Pout (mmHg)");
        print!("{:>26}", "Q (cm^3/s)");
        print!("{:>26}", "WSS (dyn/cm^2)");
        println!();
        println!("{}", "-".repeat(16 + 26 * 4));

        for (row, vessel) in model.vessels().iter().enumerate() {
            print!("{:<16}", vessel.name);
            print!("{:>26}", mmhg_range(&pressures.inlet, row));
            print!("{:>26}", mmhg_range(&pressures.outlet, row));
            print!("{:>26}", range_cell(&flows, row));
            print!("{:>26}", range_cell(&wss, row));
            println!();
        }
    }

    println!();
    println!("Analysis complete.");
    Ok(())
}

fn range_cell(m: &DMatrix<f64>, row: usize) -> String {
    let r = m.row(row);
    format!("{:.4}..{:.4}", r.min(), r.max())
}

fn mmhg_range(m: &DMatrix<f64>, row: usize) -> String {
    let r = m.row(row);
    format!("{:.4}..{:.4}", barye_to_mmhg(r.min()), barye_to_mmhg(r.max()))
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use convexlab::cone::{Comparison, Cone, ConeCfg, Operand};
use convexlab::facility::{solve, SolveCfg};
use convexlab::fixtures;
use convexlab::villages::{draw_villages, ReplayToken, VillageCfg};
use serde_json::json;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod render;
mod table;

use provenance::Payload;
use render::FacilityReport;

#[derive(Parser)]
#[command(name = "convexlab")]
#[command(about = "Cone orderings and minimax facility location")]
struct Cmd {
    /// Print a JSON document instead of narrated text
    #[arg(long, global = true)]
    json: bool,

    /// Log at DEBUG level (logs go to stderr)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Compare the classroom vectors and matrices under orthant, Lorentz and PSD orderings
    Cones,
    /// Place a facility minimizing the longest distance to any village
    Facility {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 20)]
        count: usize,
        #[arg(long, default_value_t = 0.0)]
        lo: f64,
        #[arg(long, default_value_t = 10.0)]
        hi: f64,
        /// Read villages from a CSV with `x`,`y` columns instead of sampling
        #[arg(long)]
        input: Option<String>,
        /// Write a per-village CSV table (plus a provenance sidecar)
        #[arg(long)]
        table: Option<String>,
        /// Distance band marking a village as active
        #[arg(long, default_value_t = 1e-4)]
        active_tol: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Cones => cones(cmd.json),
        Action::Facility {
            seed,
            count,
            lo,
            hi,
            input,
            table,
            active_tol,
        } => {
            let villages = VillageCfg { count, lo, hi };
            facility(seed, villages, input, table, active_tol, cmd.json)
        }
        Action::Report => report(),
    }
}

fn cones(as_json: bool) -> Result<()> {
    tracing::info!("cones");
    let cfg = ConeCfg::default();
    let cases: [(&str, &str, Cone, Operand, Operand); 4] = [
        ("x", "y", Cone::Orthant(3), fixtures::x(), fixtures::y()),
        ("x", "y", Cone::SecondOrder(3), fixtures::x(), fixtures::y()),
        ("A", "B", Cone::Psd(3), fixtures::a(), fixtures::b()),
        ("A", "C", Cone::Psd(3), fixtures::a(), fixtures::c()),
    ];
    let mut docs = Vec::new();
    for (lhs, rhs, cone, a, b) in cases {
        let m = Comparison::new(cone, a, b)
            .with_context(|| format!("comparing {lhs} and {rhs}"))?
            .evaluate(&cfg);
        if as_json {
            docs.push(render::membership_json(lhs, rhs, &m));
        } else {
            println!("{}\n", render::explain(lhs, rhs, &m));
        }
    }
    if as_json {
        println!("{}", serde_json::to_string_pretty(&docs)?);
    }
    Ok(())
}

fn facility(
    seed: u64,
    villages: VillageCfg,
    input: Option<String>,
    table: Option<String>,
    active_tol: f64,
    as_json: bool,
) -> Result<()> {
    tracing::info!(seed, count = villages.count, input = ?input, table = ?table, "facility");
    let points = match &input {
        Some(path) => table::read_villages(path)?,
        None => draw_villages(villages, ReplayToken::new(seed)),
    };
    let cfg = SolveCfg {
        active_tol,
        ..SolveCfg::default()
    };
    let solution = solve(&points, &cfg).context("solving facility location")?;
    tracing::info!(
        radius = solution.radius,
        active = solution.active.len(),
        iterations = solution.iterations,
        "solved"
    );
    let sampling_box = input.is_none().then_some((villages.lo, villages.hi));
    let report = FacilityReport::new(&points, &solution, sampling_box);

    if let Some(out) = &table {
        let out_path = Path::new(out);
        table::write_table(out_path, &report)?;
        let payload = Payload::new(
            "facility",
            json!({
                "seed": seed,
                "count": villages.count,
                "lo": villages.lo,
                "hi": villages.hi,
                "input": input,
                "active_tol": active_tol,
            }),
        );
        let prov = provenance::write_sidecar(out_path, &payload)?;
        tracing::info!(table = %out_path.display(), provenance = %prov.display(), "wrote table");
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.to_text());
    }
    Ok(())
}

fn report() -> Result<()> {
    let doc = provenance::document(&Payload::new("report", json!({})), &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

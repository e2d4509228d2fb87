#![deny(unused_variables)]
#![deny(dead_code)]
#![deny(unused_imports)]

use absrisk::io::risk_table::write_risk_table;
use absrisk::io::summary_file::{load_summary, save_summary, summary_to_json};
use absrisk::io::weights::load_variant_weights;
use absrisk::io::zscores::load_z_scores;
use absrisk::{PowerEvidence, RiskEstimate, RiskModel, calculate_risk};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;

/// Z-scores and prevalence used by the `demo` subcommand.
const DEMO_Z_SCORES: [f64; 5] = [-2.0, -1.0, 0.0, 1.0, 2.0];
const DEMO_PREVALENCE: f64 = 0.05;

#[derive(Parser)]
#[command(
    name = "absrisk",
    version,
    about = "Absolute disease risk from polygenic score Z-scores under the liability threshold model."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project Z-scores onto absolute risk
    #[command(about = "Project PRS Z-scores onto absolute risk (outputs: risks.tsv)")]
    Project(ProjectArgs),

    /// Build a model and print its summary as JSON
    Summary(SummaryArgs),

    /// Walk through the three ways of specifying predictive power
    Demo,
}

/// Prevalence plus the predictive-power evidence for a new model.
#[derive(Args)]
struct ModelArgs {
    /// Population prevalence of the disease, strictly between 0 and 1
    #[arg(long)]
    prevalence: Option<f64>,

    /// Liability-scale R² from a validation study (takes precedence over --auc and --weights)
    #[arg(long, allow_negative_numbers = true)]
    r_squared: Option<f64>,

    /// AUC from a validation study, between 0.5 and 0.9618 (the AUC of R² = 1);
    /// takes precedence over --weights
    #[arg(long, allow_negative_numbers = true)]
    auc: Option<f64>,

    /// Tab-separated variant weight table with VARIANT, BETA and AF columns
    #[arg(long, value_name = "FILE")]
    weights: Option<PathBuf>,
}

#[derive(Args)]
struct ProjectArgs {
    #[command(flatten)]
    model_args: ModelArgs,

    /// Previously saved model summary (.json or .toml) to use instead of building a model
    #[arg(long, value_name = "FILE", conflicts_with_all = ["prevalence", "r_squared", "auc", "weights"])]
    model: Option<PathBuf>,

    /// Z-scores to project
    #[arg(long, num_args = 1.., allow_negative_numbers = true, required_unless_present = "z_file", conflicts_with = "z_file")]
    z: Vec<f64>,

    /// Tab-separated file with a 'score' column and optional 'sample_id' column
    #[arg(long, value_name = "FILE")]
    z_file: Option<PathBuf>,

    /// Output path for the risk table
    #[arg(long, default_value = "risks.tsv")]
    out: PathBuf,

    /// Also save the model summary here (.json or .toml)
    #[arg(long, value_name = "FILE")]
    summary_out: Option<PathBuf>,
}

#[derive(Args)]
struct SummaryArgs {
    #[command(flatten)]
    model_args: ModelArgs,

    /// Save the summary to this path (.json or .toml) as well as printing it
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Project(args) => project(args),
        Commands::Summary(args) => summary(args),
        Commands::Demo => demo(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn build_model(args: &ModelArgs) -> Result<RiskModel, Box<dyn std::error::Error>> {
    let prevalence = args
        .prevalence
        .ok_or("--prevalence is required unless --model is given")?;

    // Only read the weight table when nothing more authoritative was supplied.
    let weights = match (&args.weights, args.r_squared, args.auc) {
        (Some(path), None, None) => Some(load_variant_weights(path)?),
        (Some(path), _, _) => {
            log::info!(
                "Ignoring weight table {} because a direct R² or AUC was supplied",
                path.display()
            );
            None
        }
        (None, _, _) => None,
    };

    let evidence = PowerEvidence {
        r_squared: args.r_squared,
        auc: args.auc,
        weights,
    };
    Ok(RiskModel::from_evidence(prevalence, evidence)?)
}

fn project(args: ProjectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let model = match &args.model {
        Some(path) => {
            println!("Loading model summary from: {}", path.display());
            RiskModel::from_summary(&load_summary(path)?)?
        }
        None => build_model(&args.model_args)?,
    };

    let (sample_ids, z_scores) = match &args.z_file {
        Some(path) => {
            let table = load_z_scores(path)?;
            (Some(table.sample_ids), table.z_scores)
        }
        None => (None, args.z.clone()),
    };

    let estimates = calculate_risk(&model, &z_scores);
    write_risk_table(&args.out, sample_ids.as_deref(), &estimates)?;
    println!(
        "Projected {} Z-score(s) ({}); results saved to: {}",
        estimates.len(),
        model.method_used(),
        args.out.display()
    );

    if let Some(path) = &args.summary_out {
        save_summary(&model.summary(), path)?;
        println!("Model summary saved to: {}", path.display());
    }
    Ok(())
}

fn summary(args: SummaryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let model = build_model(&args.model_args)?;
    let summary = model.summary();
    println!("{}", summary_to_json(&summary)?);
    if let Some(path) = &args.out {
        save_summary(&summary, path)?;
    }
    Ok(())
}

fn demo() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n1. Using empirical R²:");
    let from_r2 = RiskModel::from_r_squared(DEMO_PREVALENCE, 0.1)?;
    print_model_report(&from_r2)?;

    println!("\n2. Using AUC:");
    let from_auc = RiskModel::from_auc(DEMO_PREVALENCE, 0.65)?;
    print_model_report(&from_auc)?;

    println!("\n3. Using PRS weights file (example format):");
    println!("VARIANT\tBETA\tAF");
    println!("rs123\t0.02\t0.3");
    println!("rs456\t0.01\t0.5");
    println!("rs789\t0.03\t0.1");
    Ok(())
}

fn print_model_report(model: &RiskModel) -> Result<(), Box<dyn std::error::Error>> {
    println!("\nModel Info:");
    println!("{}", summary_to_json(&model.summary())?);
    println!("\nRisk Calculations:");
    print_risk_rows(&calculate_risk(model, &DEMO_Z_SCORES));
    Ok(())
}

fn print_risk_rows(estimates: &[RiskEstimate]) {
    println!(
        "{:>8} {:>10} {:>13} {:>13} {:>13} {:>13} {:>10}",
        "raw_z",
        "adjusted_z",
        "absolute_risk",
        "risk_ci_lower",
        "risk_ci_upper",
        "relative_risk",
        "odds_ratio"
    );
    for est in estimates {
        println!(
            "{:>8.3} {:>10.3} {:>13.3} {:>13.3} {:>13.3} {:>13.3} {:>10.3}",
            est.raw_z,
            est.adjusted_z,
            est.absolute_risk,
            est.risk_ci_lower,
            est.risk_ci_upper,
            est.relative_risk,
            est.odds_ratio
        );
    }
}

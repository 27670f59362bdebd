//! CLI for nonlocality: Bell-type witnesses from recorded measurement counts.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nonlocality")]
#[command(about = "nonlocality: Mermin, Svetlichny and CHSH witnesses from measurement counts")]
#[command(version = nonlocality_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the basis strings, coefficients and rotation gates for an inequality
    Schedule {
        /// Inequality family: mermin, svetlichny (svet), chsh
        #[arg(long)]
        family: String,

        /// Number of parties (qubits per sub-experiment)
        #[arg(long)]
        qubits: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List every supported inequality with its classical and quantum bounds
    Bounds {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a Mermin or Svetlichny witness from a JSON list of histograms
    Evaluate {
        /// Inequality family: mermin, svetlichny (svet)
        #[arg(long)]
        family: String,

        /// Number of parties (qubits per sub-experiment)
        #[arg(long)]
        qubits: usize,

        /// JSON file: array of {bitstring: count} objects, one per basis string
        #[arg(long)]
        counts: String,

        /// Independent sub-experiments packed side by side in each circuit
        #[arg(long, default_value = "1")]
        sub_experiments: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// CHSH1/CHSH2 over an angle sweep (four histograms per angle: ZZ, ZX, XZ, XX)
    Chsh {
        /// JSON file: array of {bitstring: count} objects
        #[arg(long)]
        counts: String,

        /// Number of angles the counts were taken at, evenly spaced over [0, 2π]
        #[arg(long)]
        thetas: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run a configured experiment against recorded counts and print the report
    Run {
        /// Experiment config JSON (family, qubits, shots, repetitions, parallel_copies, device)
        #[arg(long)]
        config: String,

        /// JSON file: array of {bitstring: count} objects, one per circuit
        #[arg(long)]
        counts: String,
    },

    /// Start the HTTP API server
    Server {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, default_value = "8042")]
        port: u16,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Schedule {
            family,
            qubits,
            json,
        } => commands::schedule::run(&family, qubits, json),
        Commands::Bounds { json } => commands::bounds::run(json),
        Commands::Evaluate {
            family,
            qubits,
            counts,
            sub_experiments,
            json,
        } => commands::evaluate::run(commands::evaluate::EvaluateCommandConfig {
            family: &family,
            qubits,
            counts_path: &counts,
            sub_experiments,
            json,
        }),
        Commands::Chsh {
            counts,
            thetas,
            json,
        } => commands::chsh::run(&counts, thetas, json),
        Commands::Run { config, counts } => commands::run::run(&config, &counts),
        Commands::Server { host, port } => commands::server::run(&host, port),
    }
}

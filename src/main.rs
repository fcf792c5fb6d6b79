//! `u-assign`: solve a line balancing request from the command line.
//!
//! Reads a JSON request from a file or stdin and writes the JSON response
//! to stdout or a file.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use u_assign::api::{self, SolveRequest};
use u_assign::logging;
use u_assign::models::ObjectivePreset;

/// Assigns production operations to employees and balances their loads
#[derive(Parser)]
#[command(name = "u-assign")]
#[command(about = "Assigns production operations to employees and balances their loads")]
pub struct Args {
    /// Request file, or "-" for stdin
    #[arg(long, default_value = "-")]
    pub input: String,

    /// Response file (stdout if omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// RNG seed (overrides the request config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of independent local search restarts
    #[arg(long)]
    pub restarts: Option<usize>,

    /// Objective preset (default, balanced, fastest, best-balance)
    #[arg(long)]
    pub preset: Option<ObjectivePreset>,

    /// Local search iteration budget
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Pretty-print the response
    #[arg(long)]
    pub pretty: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Applies command line overrides to the request config.
    fn apply(&self, request: &mut SolveRequest) {
        let mut config = request.config.clone();
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(restarts) = self.restarts {
            config = config.with_restarts(restarts);
        }
        if let Some(preset) = self.preset {
            config = config.with_preset(preset);
        }
        if let Some(max_iterations) = self.max_iterations {
            config = config.with_max_iterations(max_iterations);
        }
        request.config = config;
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_tracing(&args.log_level);

    let mut request = if args.input == "-" {
        api::from_reader(io::stdin().lock()).context("failed to parse request from stdin")?
    } else {
        api::read_request(&args.input)
            .with_context(|| format!("failed to read request from {}", args.input))?
    };
    args.apply(&mut request);

    let response = api::solve_request(&request).context("solve failed")?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            api::write_response(&mut writer, &response, args.pretty)?;
            writer.flush()?;
        }
        None => api::write_response(io::stdout().lock(), &response, args.pretty)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_assign::models::SolverConfig;

    fn request(config: SolverConfig) -> SolveRequest {
        SolveRequest {
            operations: Vec::new(),
            employees: Vec::new(),
            efficiency_estimates: Vec::new(),
            config,
        }
    }

    #[test]
    fn test_flags_override_request_config() {
        let mut req = request(
            SolverConfig::default()
                .with_seed(1)
                .with_restarts(2)
                .with_max_iterations(50),
        );
        let args = Args::parse_from([
            "u-assign",
            "--seed",
            "9",
            "--preset",
            "best-balance",
            "--max-iterations",
            "10",
        ]);
        args.apply(&mut req);

        assert_eq!(req.config.seed, Some(9));
        assert_eq!(req.config.max_iterations, 10);
        assert_eq!(req.config.preset, Some(ObjectivePreset::BestBalance));
        // Not given on the command line.
        assert_eq!(req.config.restarts, 2);
    }

    #[test]
    fn test_defaults_leave_request_untouched() {
        let config = SolverConfig::default().with_seed(3).with_restarts(4);
        let mut req = request(config.clone());
        let args = Args::parse_from(["u-assign"]);
        args.apply(&mut req);

        assert_eq!(req.config, config);
        assert_eq!(args.input, "-");
        assert!(!args.pretty);
    }

    #[test]
    fn test_unknown_preset_is_rejected() {
        assert!(Args::try_parse_from(["u-assign", "--preset", "quickest"]).is_err());
    }
}

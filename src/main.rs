use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

use yggdrasil_split::{Dataset, Sample, SplitCriterion, SplitScanner, sort_samples};

/// Number of class labels in generated data; labels are drawn from `0..NUM_CLASSES`.
const NUM_CLASSES: usize = 10;

#[derive(Parser)]
#[command(name = "yggdrasil")]
#[command(about = "Find the best decision-tree split threshold over random data")]
#[command(version)]
struct Cli {
    /// Number of random rows to generate
    rows: usize,

    /// RNG seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Impurity criterion: "gini" or "entropy"
    #[arg(long, default_value = "gini")]
    criterion: String,

    /// Print a JSON summary instead of plain text
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Enable verbose (debug-level) logging
    #[arg(long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long)]
    quiet: bool,
}

// --- JSON stdout output struct ---

#[derive(Serialize)]
struct SplitOutput {
    n_rows: usize,
    n_classes: usize,
    seed: u64,
    criterion: String,
    found: bool,
    threshold: Option<f64>,
    gain: f64,
    full_impurity: f64,
    left_counts: Option<Vec<usize>>,
    right_counts: Option<Vec<usize>>,
    n_candidates: usize,
    elapsed_ms: u128,
}

fn parse_criterion(s: &str) -> Result<SplitCriterion> {
    match s {
        "gini" => Ok(SplitCriterion::Gini),
        "entropy" => Ok(SplitCriterion::Entropy),
        other => anyhow::bail!("unknown criterion: {other} (expected gini or entropy)"),
    }
}

/// Format a threshold the way a C++ stream prints a double by default:
/// `%g` with 6 significant digits and trailing zeros removed.
fn format_threshold(value: f64) -> String {
    let scientific = format!("{value:.5e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if (-4..6).contains(&exponent) {
        let decimals = usize::try_from(5 - exponent).unwrap_or(0);
        trim_fraction(format!("{value:.decimals$}"))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa.to_string()),
            exponent.abs()
        )
    }
}

fn trim_fraction(s: String) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

fn generate(rows: usize, seed: u64) -> Result<Dataset<NUM_CLASSES>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let samples = (0..rows)
        .map(|_| {
            let label = rng.gen_range(0..NUM_CLASSES);
            let value = rng.r#gen::<f64>();
            Sample::new(value, label)
        })
        .collect();
    Dataset::new(samples).context("failed to build dataset")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if cli.rows == 0 {
        anyhow::bail!("<rows> must be greater than 0");
    }
    let criterion = parse_criterion(&cli.criterion)?;

    let dataset = generate(cli.rows, cli.seed)?;
    info!(n_rows = dataset.len(), seed = cli.seed, "dataset generated");

    let sorted = sort_samples(&dataset);

    let start = Instant::now();
    let result = SplitScanner::new(criterion).scan(&sorted);
    let elapsed_ms = start.elapsed().as_millis();
    info!(
        found = result.is_found(),
        n_candidates = result.n_candidates(),
        elapsed_ms,
        "split search complete"
    );

    if cli.json {
        let output = SplitOutput {
            n_rows: cli.rows,
            n_classes: NUM_CLASSES,
            seed: cli.seed,
            criterion: criterion.to_string(),
            found: result.is_found(),
            threshold: result.threshold(),
            gain: result.gain(),
            full_impurity: result.full_impurity().value(),
            left_counts: result.best().map(|b| b.left().counts().to_vec()),
            right_counts: result.best().map(|b| b.right().counts().to_vec()),
            n_candidates: result.n_candidates(),
            elapsed_ms,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match result.threshold() {
            Some(threshold) => {
                println!("Found split, best threshold: {}", format_threshold(threshold));
            }
            None => println!("No split found!"),
        }
        println!("{elapsed_ms} milliseconds");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{NUM_CLASSES, format_threshold, generate, parse_criterion};
    use yggdrasil_split::SplitCriterion;

    #[test]
    fn parses_known_criteria() {
        assert_eq!(parse_criterion("gini").unwrap(), SplitCriterion::Gini);
        assert_eq!(parse_criterion("entropy").unwrap(), SplitCriterion::Entropy);
        assert!(parse_criterion("mse").is_err());
    }

    #[test]
    fn generated_data_is_reproducible_and_in_range() {
        let a = generate(500, 7).unwrap();
        let b = generate(500, 7).unwrap();
        assert_eq!(a.samples(), b.samples());
        for s in a.samples() {
            assert!(s.label() < NUM_CLASSES);
            assert!((0.0..1.0).contains(&s.value()));
        }
    }

    #[test]
    fn zero_rows_is_rejected_by_dataset() {
        assert!(generate(0, 1).is_err());
    }

    #[test]
    fn threshold_prints_six_significant_digits() {
        assert_eq!(format_threshold(0.49982312345678), "0.499823");
        assert_eq!(format_threshold(0.2), "0.2");
        assert_eq!(format_threshold(-0.25), "-0.25");
        assert_eq!(format_threshold(0.0), "0");
        assert_eq!(format_threshold(12.5), "12.5");
    }

    #[test]
    fn threshold_switches_to_scientific_outside_fixed_range() {
        assert_eq!(format_threshold(123_456_789.0), "1.23457e+08");
        assert_eq!(format_threshold(0.0000123), "1.23e-05");
        assert_eq!(format_threshold(0.0001), "0.0001");
    }
}

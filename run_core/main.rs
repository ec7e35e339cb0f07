use anyhow::{Context, Result};
use clap::Parser;
use run_core::*;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install log subscriber")?;

    let config = Config::resolve(&args).context("invalid configuration")?;
    info!(
        "{} tickers from {} (rsi {}, sma {}/{}, fee {} bp)",
        config.tickers.len(),
        config.data_dir.display(),
        config.rsi_window,
        config.sma_fast,
        config.sma_slow,
        config.fee_bp
    );

    let provider = CsvBarProvider::new(&config.data_dir, config.max_bars);
    let report = run_core(&config, &provider);

    println!("\n=== CORE SUMMARY ===");
    print!("{}", format_summary_table(&report));

    if let Some(path) = &config.report_path {
        write_json_report(&report, path)?;
        info!("Summary written to {}", path.display());
    }

    if let Some(ticker) = &config.ml_ticker {
        match run_ml(ticker, &provider, config.ml_test_frac, config.ml_max_iter) {
            Ok(evaluation) => {
                println!("\n=== ML: {} ===", ticker);
                println!("accuracy: {:.3}\n", evaluation.accuracy);
                print!("{}", evaluation);
            }
            Err(e) => warn!("[ML] {}: {}", ticker, e),
        }
    }

    if report.summaries.is_empty() {
        anyhow::bail!("no ticker could be backtested");
    }
    Ok(())
}

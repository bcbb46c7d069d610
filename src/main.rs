use anyhow::Result;
use clap::Parser;
use testtime::aggregator::Aggregator;
use testtime::cli::Cli;
use testtime::reporter::{ConsoleReporter, Reporter};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let mut reporter = ConsoleReporter::new(std::io::stdout());

    if args.skip_requested() {
        reporter.info("Skipping test times because tests are skipped.");
        return Ok(());
    }

    let (config, warnings) = args.resolve_config()?;
    for warning in &warnings {
        reporter.failure(warning);
    }

    let aggregator = Aggregator::new(config);
    let run = aggregator.run(&args.output_dir(), &args.roots(), &mut reporter);

    if let Some(path) = run.report_path() {
        reporter.info(&format!("Slowest test times written to {}", path.display()));
    }

    Ok(())
}

use anyhow::Result;
use snippet_diff::cli;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };
    // Routes log::info!() etc. to /tmp/snippet_diff_debug.log.
    // When RUST_LOG is set, also mirrors to stderr.
    // CLI --log-level flag takes highest precedence, then RUST_LOG, then config (applied in run).
    snippet_diff::debug::init_log_bridge(options.log_level.map(|level| level.to_level_filter()));

    log::info!("Starting snippet-diff {}", snippet_diff::VERSION);

    match cli::run(&options) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::error!("{e:#}");
            snippet_diff::debug_error!("CLI", "{e:#}");
            eprintln!("snippet-diff: error: {e:#}");
            std::process::exit(1);
        }
    }
}

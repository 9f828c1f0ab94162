//! pdfmerger - merge PDF files into a single document.

use clap::Parser;
use std::process;

use pdfmerger::cli::Cli;
use pdfmerger::config::{self, Config};
use pdfmerger::{PdfMergerError, error, progress, report};

fn main() {
    let cli = Cli::parse();

    if cli.progress_window {
        if let Err(err) = progress::window::run() {
            eprintln!("Error: {err:#}");
            process::exit(1);
        }
        return;
    }

    env_logger::Builder::new()
        .filter_level(config::log_level(cli.verbose))
        .format_timestamp(None)
        .format_target(false)
        .init();

    // A panic inside the PDF library still has to reach the error dialog.
    let outcome = error::catch_panic(|| {
        Config::try_from(&cli).and_then(|config| pdfmerger::run(&config))
    });

    if let Err(err) = outcome {
        fail(&err, cli.headless);
    }
}

/// Report `err` and exit with its exit code.
fn fail(err: &PdfMergerError, headless: bool) -> ! {
    log::error!("{err}");
    if !headless {
        report::show_error(err);
    }
    process::exit(err.exit_code());
}

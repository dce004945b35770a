use std::io::{stdin, stdout};

use miette::{IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;

use mydb::{Config, Session};

fn init_logging() {
    // stdout carries the transcript, so diagnostics go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(false)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    miette::set_panic_hook();

    init_logging();

    let mut session = Session::new(Config::default());
    session.run(stdin().lock(), stdout().lock())?;

    Ok(())
}

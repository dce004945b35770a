use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::{
    DatabaseError,
    config::Config,
    db::database::Database,
    repl::meta::{HELP_LINES, MetaCommand},
    sql::interpreter::Interpreter,
};

/// One run of the interactive loop.
///
/// The session owns the catalog; everything created during the run is
/// dropped with it.
#[derive(Debug)]
pub struct Session {
    config: Config,
    database: Database,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let database = Database::with_limits(config.limits);
        Self { config, database }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Reads lines from `input` until `.exit` or end of input, writing the
    /// prompt before each read and every response line to `output`.
    ///
    /// Statement failures are part of the transcript. Bytes that are not
    /// UTF-8 are replaced with U+FFFD rather than failing the read. Only I/O
    /// errors on the streams themselves are returned.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<(), DatabaseError> {
        info!("session started");
        let mut buf = Vec::new();

        loop {
            output.write_all(self.config.prompt.as_bytes())?;
            output.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                debug!("end of input");
                break;
            }

            let text = String::from_utf8_lossy(&buf);
            let line = text.trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with('.') {
                match MetaCommand::parse(line) {
                    MetaCommand::Exit => break,
                    MetaCommand::Help => {
                        for help in HELP_LINES {
                            writeln!(output, "{help}")?;
                        }
                    }
                    MetaCommand::Unrecognized(command) => {
                        writeln!(output, "Unrecognized meta-command '{command}'")?;
                    }
                }
                continue;
            }

            for response in Interpreter::new(&mut self.database).interpret(line) {
                writeln!(output, "{response}")?;
            }
        }

        output.flush()?;
        info!(tables = self.database.tables.len(), "session ended");
        Ok(())
    }
}

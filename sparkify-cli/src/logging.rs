//! Logger setup for the CLI.
//!
//! Normal output is plain messages with no level prefix, so progress lines
//! read like ordinary console output. `--verbose` switches to timestamped,
//! level-tagged debug output. `RUST_LOG` overrides the level when set.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initialize the global logger. Call once, before any command runs.
pub(crate) fn init(verbose: bool, quiet: bool, logfile: Option<&Path>) -> io::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(level.as_str()));
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    if let Some(path) = logfile {
        let file = File::create(path)?;
        builder.target(Target::Pipe(Box::new(TeeWriter {
            console: io::stderr(),
            file: strip_ansi_escapes::Writer::new(file),
        })));
    }

    builder.init();
    Ok(())
}

/// Print an empty log line.
pub(crate) fn log_blank() {
    log::info!("");
}

/// Writes log output to stderr unchanged and to a file with ANSI codes stripped.
struct TeeWriter {
    console: io::Stderr,
    file: strip_ansi_escapes::Writer<File>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.console.write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.console.flush()?;
        self.file.flush()
    }
}

//! vbrinfo command line tool
//!
//! Prints bitrate statistics for each MPEG audio file named on the command
//! line. Files that cannot be opened are reported and skipped.

use std::fs::File;
use std::io::{self, BufWriter};
use std::process;

use vbrinfo::{allocate_buffer, Args, ConfigError, DecodeSession, Reporter, VbrError, BUFFER_SIZE, USAGE};

/// Exit status for usage errors and help
const EXIT_USAGE: i32 = 1;
/// Exit status for memory allocation failures
const EXIT_ALLOCATION: i32 = 255;

/// Print usage information to stderr
fn print_usage() {
    eprint!("{}", USAGE);
}

/// Analyze every file in order, reusing one read buffer
fn run(args: Args) -> Result<(), VbrError> {
    let mut buffer = allocate_buffer(BUFFER_SIZE)?;

    let stdout = io::stdout();
    let mut reporter = Reporter::new(BufWriter::new(stdout.lock()), args.config);
    let last = args.files.len().saturating_sub(1);

    for (index, path) in args.files.iter().enumerate() {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                // Keep stdout and stderr in order
                reporter.flush()?;
                eprintln!("vbrinfo: Could not open {}: {}", path.display(), err);
                continue;
            }
        };

        reporter.heading(path)?;
        let mut session = DecodeSession::new(file, buffer);
        session.run(&mut reporter)?;
        reporter.finish(session.stats())?;
        log::debug!(
            "{}: {} frames, {} of {} bytes skipped",
            path.display(),
            session.stats().frames(),
            session.bytes_skipped(),
            session.bytes_read()
        );

        #[cfg(feature = "diagnostics")]
        if let Some(dir) = vbrinfo::diagnostics::report_dir() {
            let report = vbrinfo::diagnostics::FileReport::new(path, session.stats(), session.bytes_skipped());
            if let Err(err) = vbrinfo::diagnostics::save_report(&dir, &report) {
                log::warn!("could not save diagnostics for {}: {}", path.display(), err);
            }
        }

        buffer = session.into_buffer();

        if index < last {
            reporter.separator()?;
        }
    }

    reporter.flush()?;
    Ok(())
}

fn main() {
    // Initialize logger with warnings by default, RUST_LOG overrides
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    // Parse command line arguments
    let args = match Args::parse() {
        Ok(args) => args,
        Err(err) => {
            match err {
                ConfigError::HelpRequested | ConfigError::MissingInput => {}
                other => eprintln!("vbrinfo: {}", other),
            }
            print_usage();
            process::exit(EXIT_USAGE);
        }
    };

    if let Err(err) = run(args) {
        match err {
            VbrError::Memory => {
                eprintln!("vbrinfo: Memory allocation failed");
                process::exit(EXIT_ALLOCATION);
            }
            other => {
                eprintln!("vbrinfo: {}", other);
                process::exit(1);
            }
        }
    }
}

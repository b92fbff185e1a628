//! Command line parsing
//!
//! Options follow getopt conventions: flags can be clustered (`-vg`), the
//! `-p` value may be attached (`-p2`) or separate (`-p 2`), `--` ends the
//! options, and parsing stops at the first operand.

use std::path::PathBuf;

use crate::config::{ReportConfig, DEFAULT_PRECISION, MAX_PRECISION};
use crate::error::{ConfigError, ConfigResult};

/// Usage text printed on `-h` and on any usage error
pub const USAGE: &str = "\
usage: vbrinfo [-v] [-g] [-s] [-p prec] [-h] files
       -v  be verbose: print the bitrate of each frame
       -g  print histogram
       -s  print summary [default if nothing else specified]
       -p  precision for average bitrate in summary,
           takes number of fractional digits, implies -s
       -h  this help
";

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub config: ReportConfig,
    pub files: Vec<PathBuf>,
}

impl Args {
    /// Parse the process arguments, program name excluded
    pub fn parse() -> ConfigResult<Self> {
        Self::parse_from(std::env::args().skip(1))
    }

    /// Parse an argument list that does not include the program name
    pub fn parse_from<I, S>(args: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into).peekable();

        let mut verbose = false;
        let mut summary = false;
        let mut histogram = false;
        let mut precision = DEFAULT_PRECISION;

        while let Some(arg) = args.peek() {
            if arg == "--" {
                args.next();
                break;
            }
            if !arg.starts_with('-') || arg == "-" {
                break;
            }
            let Some(arg) = args.next() else { break };

            let mut flags = arg.char_indices().skip(1);
            while let Some((index, flag)) = flags.next() {
                match flag {
                    's' => summary = true,
                    'g' => histogram = true,
                    'v' => verbose = true,
                    'h' => return Err(ConfigError::HelpRequested),
                    'p' => {
                        let attached = &arg[index + 1..];
                        let value = if attached.is_empty() {
                            args.next().ok_or(ConfigError::MissingArgument('p'))?
                        } else {
                            attached.to_string()
                        };
                        precision = parse_precision(&value)?;
                        summary = true;
                        break;
                    }
                    other => return Err(ConfigError::UnknownOption(other)),
                }
            }
        }

        let files: Vec<PathBuf> = args.map(PathBuf::from).collect();
        if files.is_empty() {
            return Err(ConfigError::MissingInput);
        }

        Ok(Self {
            config: ReportConfig::new(verbose, summary, histogram, precision),
            files,
        })
    }
}

fn parse_precision(value: &str) -> ConfigResult<usize> {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|&precision| precision <= MAX_PRECISION)
        .ok_or_else(|| ConfigError::InvalidPrecision(value.to_string()))
}

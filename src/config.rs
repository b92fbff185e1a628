//! Report configuration
//!
//! `ReportConfig` is built once from the command line and then shared
//! read-only by every per-file session and the reporter.

/// Default number of fractional digits for the average bitrate
pub const DEFAULT_PRECISION: usize = 3;

/// Largest precision the formatter accepts
pub const MAX_PRECISION: usize = u16::MAX as usize;

/// What to print for each analyzed file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    /// Print every frame's bitrate as it is parsed
    pub verbose: bool,
    /// Print minimum, maximum and average
    pub summary: bool,
    /// Print the bitrate histogram
    pub histogram: bool,
    /// Fractional digits for the average bitrate
    pub precision: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            summary: true,
            histogram: false,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl ReportConfig {
    /// Build a configuration from the selected output modes
    ///
    /// The summary is switched on when neither verbose nor histogram output
    /// was asked for, so every run prints something.
    pub fn new(verbose: bool, summary: bool, histogram: bool, precision: usize) -> Self {
        Self {
            verbose,
            summary: summary || !(verbose || histogram),
            histogram,
            precision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_prints_summary() {
        let config = ReportConfig::default();
        assert!(config.summary);
        assert!(!config.verbose);
        assert!(!config.histogram);
        assert_eq!(config.precision, 3);
        assert_eq!(ReportConfig::new(false, false, false, 3), config);
    }

    #[test]
    fn test_verbose_alone_has_no_summary() {
        let config = ReportConfig::new(true, false, false, 3);
        assert!(!config.summary);
    }

    proptest! {
        #[test]
        fn test_some_output_is_always_selected(
            verbose in any::<bool>(),
            summary in any::<bool>(),
            histogram in any::<bool>(),
            precision in 0usize..20,
        ) {
            let config = ReportConfig::new(verbose, summary, histogram, precision);
            prop_assert!(config.verbose || config.summary || config.histogram);
            prop_assert_eq!(config.verbose, verbose);
            prop_assert_eq!(config.histogram, histogram);
            prop_assert_eq!(config.precision, precision);
            if summary {
                prop_assert!(config.summary);
            }
        }
    }
}

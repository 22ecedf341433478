//! Config for the console behaviors
//!
//! This module provides configuration options for controlling the behavior of the
//! `pinassign` console binary.
//!
//! Configuration can be created programmatically using [`Configuration::new()`] or by reading
//! environment variables using [`Configuration::from_env()`].
//!
//! # Environment Variables
//!
//! The following environment variables can be used to override configuration values. All
//! values are optional. Flags are case-insensitive; set the value to `"true"` to enable one.
//!
//! - `PINASSIGN_VERBOSE` — Print the intro banner and command hints (default: `true`)
//! - `PINASSIGN_LOG` — Enable logging to a file (default: `false`)
//! - `PINASSIGN_SEED` — Seed the assignment tie-break for reproducible runs (default: unset, entropy)

/// Configuration for the console binary.
#[derive(Debug, Clone, Copy)]
pub struct Configuration {
    pub(crate) verbose: bool,
    pub(crate) log: bool,
    pub(crate) seed: Option<u64>,
}

impl Configuration {
    /// Create a new configuration with default parameters.
    ///
    /// By default:
    /// - The console prints the intro banner and command hints.
    /// - Logging to file is disabled.
    /// - The tie-break source is seeded from entropy.
    pub fn new() -> Self {
        Self {
            verbose: true,
            log: false,
            seed: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// The following environment variables are recognized:
    /// - `PINASSIGN_VERBOSE`: if set to `"true"`, enables the intro banner (default: `true`)
    /// - `PINASSIGN_LOG`: if set to `"true"`, enables logging to file (default: `false`)
    /// - `PINASSIGN_SEED`: if set to an integer, seeds the tie-break source (default: unset)
    ///
    /// Any other value (including unset) will result in using the default value for each field.
    pub fn from_env() -> Self {
        fn get_env_flag(var: &str, default: bool) -> bool {
            match std::env::var(var) {
                Ok(val) => val.eq_ignore_ascii_case("true"),
                Err(_) => default,
            }
        }

        Self {
            verbose: get_env_flag("PINASSIGN_VERBOSE", true),
            log: get_env_flag("PINASSIGN_LOG", false),
            seed: std::env::var("PINASSIGN_SEED")
                .ok()
                .and_then(|val| val.parse().ok()),
        }
    }

    /// Enable or disable the intro banner and command hints.
    pub fn with_verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    /// Enable or disable logging to file.
    pub fn with_log(mut self, value: bool) -> Self {
        self.log = value;
        self
    }

    /// Seed the assignment tie-break so runs are reproducible.
    pub fn with_seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

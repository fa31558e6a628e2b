//! Timeprint Library
//!
//! Print how long a block or a function call takes to run.
//!
//! ```
//! use timeprint::DEFAULT;
//!
//! {
//!     let _scope = DEFAULT.enter();
//!     // ... work ...
//! } // stderr: "it took 0.0123 ms"
//!
//! let total = DEFAULT.named("sum").run(|| (1..=10).sum::<u32>());
//! assert_eq!(total, 55);
//! ```

#[macro_use]
mod macros;

pub mod timer;
pub mod error;
pub mod report;

use lazy_static::lazy_static;
use tracing::warn;

pub use crate::timer::config::{Config, CONFIG_ENV, DEFAULT_LABEL};
pub use crate::timer::{Activated, Arg, Invoke, Scope, Timed, Timeprint};
pub use crate::error::TimeprintError;
pub use crate::report::{format_duration, format_message};

lazy_static! {
    /// Process-wide timer, configured from `TIMEPRINT_CONFIG` when set.
    pub static ref DEFAULT: Timeprint = Timeprint::with_config(
        Config::from_env().unwrap_or_else(|err| {
            warn!(error = %err, "using default timeprint configuration");
            Config::default()
        })
    );
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Caller-facing runtime for attack calculations.
//!
//! Wires the rule catalog from `rules-content` into the `rules-core` engine and
//! supplies what the pure core leaves out: OS randomness, environment-driven
//! configuration, tracing setup and a single error surface.
//!
//! - [`calculator`] hosts [`Calculator`], the entry point callers embed
//! - [`config`] reads catalog and rules paths from the environment
//! - [`logging`] installs the tracing subscriber
//! - [`random`] adapts `rand` to the engine's random source
pub mod calculator;
pub mod config;
pub mod error;
pub mod logging;
pub mod random;

pub use calculator::{Calculator, StatBreakdown};
pub use config::CalculatorConfig;
pub use error::{Result, RuntimeError};
pub use random::ThreadRandom;

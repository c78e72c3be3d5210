//! Bundled data helpers. Real historical data stays outside the core; this
//! module only synthesizes deterministic demo datasets.

pub mod demo;

pub use demo::{demo_history, demo_observations, DEMO_SEED};

#![deny(clippy::expect_used, clippy::unwrap_used)]

//! The root of the Reno congestion control library.
//! Reno拥塞控制库的根。

pub mod config;
pub mod error;
pub mod registry;

pub mod congestion;

pub use congestion::reno::{Reno, RenoCustom};
pub use congestion::{CongestionAlgorithm, CongestionControl, CongestionEvent, CongestionState};
pub use registry::Registry;

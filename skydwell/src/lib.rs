//! SkyDwell - Flight-phase segmentation and airspace dwell times
//!
//! This library turns recorded aircraft position reports into a labelled
//! flight: every sample gets a vertical rate and a phase, the phase boundaries
//! (liftoff, level-off, top of descent, touchdown) are located with their
//! sampling uncertainty, and the time spent inside each configured airspace
//! volume is aggregated.
//!
//! # Pipeline
//!
//! ```text
//! track.csv ─► telemetry ─► phase::classify ─► timing::summarize ─► metrics / CSV
//!                                                   ▲
//!                               airspace volumes ───┘
//! ```
//!
//! Each flight is processed independently and single-threaded;
//! [`analysis::analyze_batch`] parallelises across flights.

pub mod airspace;
pub mod analysis;
pub mod config;
pub mod geo;
pub mod logging;
pub mod phase;
pub mod telemetry;
pub mod timing;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

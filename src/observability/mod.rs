//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and histograms via `metrics`)
//!
//! Consumers:
//!     → stderr (fmt layer, filtered by RUST_LOG or config)
//!     → optional Prometheus scrape endpoint
//! ```
//!
//! # Design Decisions
//! - Metric updates are no-ops until an exporter is installed
//! - Key material never appears in log fields

pub mod logging;
pub mod metrics;

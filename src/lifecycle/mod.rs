//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → resolve wait_for_shutdown_signal()
//!
//! Shutdown (shutdown.rs):
//!     trigger() → periodic sync tasks leave their loops → process exits
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_shutdown_signal;

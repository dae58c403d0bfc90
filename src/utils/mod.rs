//! Utility functions shared by the library and the CLI.
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration file in the per-user app data directory
//! - [`logging`] - `tracing` subscriber setup
//! - [`sanitize`] - HTML escaping for rendering boundaries
//!
//! ```
//! use dropfinder::utils::escape;
//!
//! assert_eq!(escape("<Fire & Ice>"), "&lt;Fire &amp; Ice&gt;");
//! ```

pub mod app_data;
pub mod logging;
pub mod sanitize;

pub use app_data::*;
pub use logging::*;
pub use sanitize::*;

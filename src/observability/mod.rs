//! Observability infrastructure: logging setup, crash reports, and request
//! context tracking.
//!
//! Install the panic hook and logging at startup:
//!
//! ```ignore
//! use peersense::observability::{init_logging, install_panic_hook, LogSettings};
//!
//! fn main() -> anyhow::Result<()> {
//!     install_panic_hook();
//!     init_logging(&LogSettings::default())?;
//!     // ... open the session
//!     Ok(())
//! }
//! ```
//!
//! Track the phase of the current request so a crash report can say where it
//! happened:
//!
//! ```ignore
//! use peersense::observability::{set_phase, RequestPhase};
//!
//! let _phase = set_phase(RequestPhase::Fetching);
//! source.fetch(user_id)?;
//! ```

pub mod context;
pub mod panic_hook;
pub mod tracing;

pub use context::{
    get_current_context, set_phase, set_user_id, ContextGuard, RequestContextInfo, RequestPhase,
};
pub use panic_hook::install_panic_hook;
pub use tracing::{init_logging, is_tui_active, set_tui_active, LogSettings};

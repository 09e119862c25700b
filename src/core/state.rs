//! Process state shared with the Ctrl+C handler.
//!
//! - `SHUTDOWN`: Has shutdown been requested? (Ctrl+C received)
//!
//! Running external commands poll this flag and kill their child process
//! once it is set, so a batch stops at the current font.

use std::sync::atomic::{AtomicBool, Ordering};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

// =============================================================================
// SHUTDOWN state
// =============================================================================

/// Setup the global Ctrl+C handler. Call once at program start
///
/// A second Ctrl+C exits immediately instead of waiting for the running
/// command to be killed.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        if SHUTDOWN.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
        crate::log!("build"; "cancelling...");
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Check if shutdown has been requested
///
/// Uses Relaxed ordering for performance - worst case is one more poll
/// of the running command before it is killed
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_starts_clear() {
        // Nothing in the unit test binary installs the handler or requests shutdown
        assert!(!is_shutdown());
    }
}

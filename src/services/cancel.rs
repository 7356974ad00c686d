use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative stop flag, checked by directory runs before each image.
///
/// Cloning shares the flag. A single image's warp loop is never
/// interrupted; cancellation takes effect at the next image boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Cancel this token on Ctrl-C / SIGINT.
    ///
    /// The process keeps running: the current image finishes, the run
    /// stops at the next boundary and the report is still written. Only
    /// one handler can be installed per process.
    pub fn cancel_on_interrupt(&self) -> Result<(), ctrlc::Error> {
        let token = self.clone();
        ctrlc::set_handler(move || {
            tracing::warn!("Interrupt received, finishing current image");
            token.cancel();
        })
    }
}

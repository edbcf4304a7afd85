//! Change detection: page signals driving refresh and CWD replay.
//!
//! The actuation layer pushes [`PageSignal`]s over an mpsc channel. A
//! navigation invalidates everything, so the working directory resets to
//! root with the refresh. A same-document mutation rebuilds the tree too,
//! but then replays the old CWD display names against the fresh tree —
//! falling back silently to root if any segment no longer resolves.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::kernel::Kernel;
use crate::source::PageSignal;

/// Pumps page signals into a kernel, strictly serially.
pub struct ChangeDetector {
    rx: mpsc::Receiver<PageSignal>,
}

impl ChangeDetector {
    pub fn new(rx: mpsc::Receiver<PageSignal>) -> Self {
        Self { rx }
    }

    /// Process signals until the sending side closes.
    pub async fn run(mut self, kernel: &mut Kernel) {
        while let Some(signal) = self.rx.recv().await {
            Self::handle(kernel, signal).await;
        }
    }

    /// Apply one signal to the kernel.
    pub async fn handle(kernel: &mut Kernel, signal: PageSignal) {
        if !kernel.is_attached() {
            debug!(?signal, "ignoring signal while detached");
            return;
        }
        match signal {
            PageSignal::Navigated => {
                if let Err(e) = kernel.refresh().await {
                    warn!(error = %e, "refresh after navigation failed");
                }
            }
            PageSignal::DomMutated => {
                let previous = kernel.cwd_names_below_root();
                if let Err(e) = kernel.refresh().await {
                    warn!(error = %e, "refresh after mutation failed");
                    return;
                }
                kernel.replay_cwd(&previous);
            }
        }
    }
}

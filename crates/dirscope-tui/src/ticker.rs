//! Spinner cadence thread.
//!
//! A [`SpinnerTicker`] owns one dedicated worker thread that advances a
//! bounded frame counter and posts a redraw request into the UI event
//! queue at a fixed cadence. Redraw requests coalesce in the queue, so
//! the cadence is a lower bound on visible updates, not an exact period.
//!
//! The only cross-thread state is the frame counter (read-only from the
//! render path) and the cancellation flag, both atomics. The worker runs
//! no fallible operations; a closed or full queue degrades to a silent
//! no-op.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tokio::sync::mpsc;

/// Opaque "please repaint" message posted into the UI event queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedrawRequest;

/// Frame counter wraps back to zero at this modulus.
pub const SPINNER_MODULUS: usize = 200;

/// Sleep interval between worker iterations.
const TICK_INTERVAL: Duration = Duration::from_millis(95);

/// Cadence-driven worker cooperating with the single-threaded UI loop.
///
/// The worker thread starts at construction and runs until [`stop`]
/// (or drop) sets the cancellation flag and joins it; no detached
/// threads are left behind.
///
/// [`stop`]: SpinnerTicker::stop
#[derive(Debug)]
pub struct SpinnerTicker {
    frame: Arc<AtomicUsize>,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl SpinnerTicker {
    /// Start the worker thread, posting redraw requests into `events`.
    pub fn start(events: mpsc::Sender<RedrawRequest>) -> Self {
        let frame = Arc::new(AtomicUsize::new(0));
        let stop = Arc::new(AtomicBool::new(false));

        let worker_frame = Arc::clone(&frame);
        let worker_stop = Arc::clone(&stop);
        let worker = thread::spawn(move || {
            while !worker_stop.load(Ordering::Acquire) {
                // Sole writer, so a load/store pair is race-free.
                let next = (worker_frame.load(Ordering::Relaxed) + 1) % SPINNER_MODULUS;
                worker_frame.store(next, Ordering::Relaxed);

                // Queue full or receiver gone: drop the request.
                let _ = events.try_send(RedrawRequest);

                thread::yield_now();
                thread::sleep(TICK_INTERVAL);
            }
        });

        Self {
            frame,
            stop,
            worker: Some(worker),
        }
    }

    /// Current frame counter, in `0..SPINNER_MODULUS`.
    pub fn frame(&self) -> usize {
        self.frame.load(Ordering::Relaxed)
    }

    /// Request cancellation and block until the worker has exited.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }

    /// Whether the worker has been joined.
    pub fn is_stopped(&self) -> bool {
        self.worker.is_none()
    }
}

impl Drop for SpinnerTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

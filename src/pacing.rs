//! Suspension points for animated searches and the flag used to abort them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Called by the engine whenever an animated search yields to its host.
///
/// The grid is handed over so the host can redraw before resuming.
pub trait Pacer<G: ?Sized> {
    fn pause(&mut self, grid: &G, duration: Duration);
}

/// Blocks the calling thread for the configured duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl<G: ?Sized> Pacer<G> for ThreadPacer {
    fn pause(&mut self, _grid: &G, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacer;

impl<G: ?Sized> Pacer<G> for NoPacer {
    fn pause(&mut self, _grid: &G, _duration: Duration) {}
}

impl<G: ?Sized, F> Pacer<G> for F
where
    F: FnMut(&G, Duration),
{
    fn pause(&mut self, grid: &G, duration: Duration) {
        self(grid, duration)
    }
}

/// Cooperative cancellation flag shared between a running search and
/// whoever may want to stop it, possibly from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    pub fn reset(&self) {
        self.flag.store(false, Ordering::Release);
    }
}

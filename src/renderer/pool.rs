//! Fixed pool of blit workers.

use super::Surface;
use crate::buffer::{Canvas, Point, Rect};
use crate::error::{Error, Result};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Upper bound for [`BlitPool::default_workers`].
const MAX_DEFAULT_WORKERS: usize = 4;

/// One rectangle to copy.
struct Job {
    canvas: Arc<Canvas>,
    rect: Rect,
    dest: Point,
}

/// Fans blits out to a fixed set of worker threads.
///
/// [`blit`](Self::blit) returns only after every job it queued has been
/// acknowledged, and each worker drops its canvas handle before
/// acknowledging. When `blit` returns the caller is again the only owner of
/// the canvas and may mutate it in place.
pub struct BlitPool {
    jobs: Option<Sender<Job>>,
    acks: Receiver<Result<()>>,
    workers: Vec<JoinHandle<()>>,
}

impl std::fmt::Debug for BlitPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlitPool")
            .field("workers", &self.workers.len())
            .finish_non_exhaustive()
    }
}

impl BlitPool {
    /// Spawn `workers` threads (at least one) blitting to `surface`.
    pub fn new(surface: Arc<dyn Surface>, workers: usize) -> Result<Self> {
        let workers = workers.max(1);
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (ack_tx, ack_rx) = mpsc::channel::<Result<()>>();
        let job_rx = Arc::new(Mutex::new(job_rx));

        let mut handles = Vec::with_capacity(workers);
        for id in 0..workers {
            let jobs = Arc::clone(&job_rx);
            let acks = ack_tx.clone();
            let surface = Arc::clone(&surface);
            let handle = thread::Builder::new()
                .name(format!("textframe-blit-{id}"))
                .spawn(move || worker_main(&jobs, &acks, surface.as_ref()))?;
            handles.push(handle);
        }
        debug!(workers, "blit pool started");

        Ok(Self {
            jobs: Some(job_tx),
            acks: ack_rx,
            workers: handles,
        })
    }

    /// Available parallelism, capped at four.
    #[must_use]
    pub fn default_workers() -> usize {
        thread::available_parallelism()
            .map_or(1, std::num::NonZeroUsize::get)
            .min(MAX_DEFAULT_WORKERS)
    }

    /// Number of worker threads.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers.len()
    }

    /// Copy every rectangle of `canvas` to `origin + rect.min()`.
    ///
    /// Blocks until all jobs are acknowledged and returns the first error
    /// any of them reported.
    pub fn blit(&self, canvas: &Arc<Canvas>, rects: &[Rect], origin: Point) -> Result<()> {
        let Some(jobs) = &self.jobs else {
            return Err(Error::Disconnected);
        };

        let mut sent = 0;
        for &rect in rects {
            let job = Job {
                canvas: Arc::clone(canvas),
                rect,
                dest: origin + rect.min(),
            };
            if jobs.send(job).is_err() {
                break;
            }
            sent += 1;
        }

        let mut first_err = None;
        for _ in 0..sent {
            match self.acks.recv() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    warn!(error = %e, "blit failed");
                    first_err.get_or_insert(e);
                }
                Err(_) => {
                    first_err.get_or_insert(Error::Disconnected);
                    break;
                }
            }
        }
        if sent < rects.len() {
            first_err.get_or_insert(Error::Disconnected);
        }
        first_err.map_or(Ok(()), Err)
    }
}

impl Drop for BlitPool {
    fn drop(&mut self) {
        // Closing the job channel ends every worker loop.
        self.jobs.take();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

fn worker_main(jobs: &Mutex<Receiver<Job>>, acks: &Sender<Result<()>>, surface: &dyn Surface) {
    loop {
        let job = {
            let Ok(rx) = jobs.lock() else {
                return;
            };
            rx.recv()
        };
        let Ok(Job { canvas, rect, dest }) = job else {
            return;
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| surface.blit(dest, &canvas, rect)))
            .unwrap_or_else(|payload| {
                let msg = panic_message(payload.as_ref());
                warn!(%msg, "blit worker panicked");
                Err(Error::WorkerPanicked(msg))
            });
        drop(canvas);

        if acks.send(result).is_err() {
            return;
        }
    }
}

fn panic_message(payload: &dyn std::any::Any) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "blit worker panicked".to_string())
}

//! Presentation of painted rectangles.
//!
//! The layout engine paints into an off-screen [`Canvas`] and remembers which
//! rectangles it touched. Presenting means copying exactly those rectangles
//! to a [`Surface`], the host's window or framebuffer.
//!
//! # Architecture
//!
//! ```text
//! Owner thread                          BlitPool workers
//! ------------                          ----------------
//! paint into canvas, record rects
//! present(pool)
//!   send Job(Arc<Canvas>, rect) ──────▶ receive
//!   ...one job per rect                 surface.blit(dest, canvas, rect)
//!                                       drop canvas clone
//!   wait for every ack  ◀────────────── send ack
//! clear dirty rects
//! ```
//!
//! Because `present` blocks until the last acknowledgement, no edit can
//! touch the canvas while a worker still reads it.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use textframe::buffer::{Canvas, Point, Rect};
//! use textframe::renderer::{BlitPool, MemorySurface};
//! use textframe::Rgba;
//!
//! let surface = Arc::new(MemorySurface::new(8, 8));
//! let pool = BlitPool::new(surface.clone(), 2)?;
//!
//! let mut canvas = Canvas::new(4, 4);
//! canvas.fill_rect(canvas.bounds(), Rgba::BLACK);
//! pool.blit(&Arc::new(canvas), &[Rect::new(0, 0, 2, 2)], Point::new(4, 4))?;
//!
//! assert_eq!(surface.snapshot().get(Point::new(5, 5)), Some(Rgba::BLACK));
//! assert_eq!(surface.snapshot().get(Point::new(6, 6)), Some(Rgba::TRANSPARENT));
//! # Ok::<(), textframe::Error>(())
//! ```

mod pool;

pub use pool::BlitPool;

use crate::buffer::{Canvas, Point, Rect};
use crate::error::{Error, Result};
use std::sync::{Mutex, PoisonError};

/// Destination of blits.
///
/// Calls arrive from pool workers, possibly several at once, always for
/// disjoint destination rectangles within one present.
pub trait Surface: Send + Sync {
    /// Copy `rect` of `src` so that its top-left corner lands on `dest`.
    fn blit(&self, dest: Point, src: &Canvas, rect: Rect) -> Result<()>;
}

/// A surface backed by an in-memory canvas.
///
/// Useful for headless hosts and for checking that presented pixels match
/// what the engine painted.
#[derive(Debug)]
pub struct MemorySurface {
    canvas: Mutex<Canvas>,
}

impl MemorySurface {
    /// Create a transparent surface of the given size.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            canvas: Mutex::new(Canvas::new(width, height)),
        }
    }

    /// Copy of the current surface pixels.
    #[must_use]
    pub fn snapshot(&self) -> Canvas {
        self.canvas
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Surface for MemorySurface {
    fn blit(&self, dest: Point, src: &Canvas, rect: Rect) -> Result<()> {
        let mut canvas = self
            .canvas
            .lock()
            .map_err(|_| Error::Surface("surface lock poisoned".to_string()))?;
        canvas.copy_from(dest, src, rect);
        Ok(())
    }
}

//! `textframe` - byte-addressed text viewport engine
//!
//! The rendering and editing core of a text widget: a document store with a
//! scrollable window onto it, a layout engine that breaks the visible bytes
//! into lines of variable-width glyph runs, a selection, and incremental
//! repainting that only touches the screen regions an edit changed.
//!
//! # Layers
//!
//! - [`viewport::Viewport`] holds the whole document and decides which part
//!   is visible.
//! - [`frame::Frame`] lays out and paints the visible part into a
//!   [`buffer::Canvas`], recording dirty rectangles.
//! - [`renderer::BlitPool`] copies dirty rectangles to a host
//!   [`renderer::Surface`] in parallel.
//!
//! Glyph metrics and masks come from a [`font::GlyphProvider`].

// Crate-level lint configuration
#![warn(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow frame::FrameOptions etc
#![allow(clippy::missing_errors_doc)] // Error variants are documented on `Error`
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod buffer;
pub mod color;
pub mod error;
pub mod font;
pub mod frame;
pub mod input;
pub mod renderer;
pub mod style;
pub mod viewport;

// Re-export core types at crate root
pub use color::Rgba;
pub use error::{Error, Result};
pub use style::Theme;

// Re-export commonly used types
pub use buffer::{Canvas, Point, Rect};
pub use font::{BlockFont, Glyph, GlyphProvider};
pub use frame::{Frame, FrameOptions, ScrollRequest};
pub use input::{Buttons, MouseEvent, MouseEventKind};
pub use renderer::{BlitPool, MemorySurface, Surface};
pub use viewport::{Viewport, ViewportOptions, WaterMarks};

//! Input events delivered to a viewport.
//!
//! Hosts translate their native pointer events into [`MouseEvent`]s in
//! window pixel coordinates and hand them to
//! [`Viewport::handle_mouse`](crate::viewport::Viewport::handle_mouse).

mod mouse;

pub use mouse::{Buttons, MouseEvent, MouseEventKind};

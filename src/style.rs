//! Color theme for the layout engine.
//!
//! A [`Theme`] is an immutable value handed to a [`Frame`](crate::Frame) when
//! it is built. Nothing in the crate reads colors from global state.
//!
//! # Examples
//!
//! ```
//! use textframe::{Rgba, Theme};
//!
//! let dark = Theme::builder()
//!     .back(Rgba::BLACK)
//!     .text(Rgba::WHITE)
//!     .build();
//! assert_eq!(dark.back, Rgba::BLACK);
//! assert_eq!(dark.hi_back, Theme::default().hi_back);
//! ```

use crate::color::Rgba;

/// Colors used to paint text, selection, caret and scrollbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Background of unselected text.
    pub back: Rgba,
    /// Glyph color of unselected text.
    pub text: Rgba,
    /// Background of selected text.
    pub hi_back: Rgba,
    /// Glyph color of selected text.
    pub hi_text: Rgba,
    /// Caret drawn for an empty selection.
    pub tick: Rgba,
    /// Scrollbar trough.
    pub scroll_back: Rgba,
    /// Scrollbar thumb.
    pub scroll_thumb: Rgba,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            back: Rgba::PALE_YELLOW,
            text: Rgba::BLACK,
            hi_back: Rgba::DARK_YELLOW,
            hi_text: Rgba::BLACK,
            tick: Rgba::BLACK,
            scroll_back: Rgba::KHAKI,
            scroll_thumb: Rgba::MAUVE,
        }
    }
}

impl Theme {
    /// Start a builder from the default theme.
    #[must_use]
    pub fn builder() -> ThemeBuilder {
        ThemeBuilder {
            theme: Self::default(),
        }
    }

    /// Background and glyph colors for a byte, depending on selection.
    #[must_use]
    pub const fn colors(&self, highlighted: bool) -> (Rgba, Rgba) {
        if highlighted {
            (self.hi_back, self.hi_text)
        } else {
            (self.back, self.text)
        }
    }
}

/// Fluent builder for [`Theme`].
#[derive(Clone, Copy, Debug)]
pub struct ThemeBuilder {
    theme: Theme,
}

impl ThemeBuilder {
    #[must_use]
    pub const fn back(mut self, color: Rgba) -> Self {
        self.theme.back = color;
        self
    }

    #[must_use]
    pub const fn text(mut self, color: Rgba) -> Self {
        self.theme.text = color;
        self
    }

    #[must_use]
    pub const fn hi_back(mut self, color: Rgba) -> Self {
        self.theme.hi_back = color;
        self
    }

    #[must_use]
    pub const fn hi_text(mut self, color: Rgba) -> Self {
        self.theme.hi_text = color;
        self
    }

    #[must_use]
    pub const fn tick(mut self, color: Rgba) -> Self {
        self.theme.tick = color;
        self
    }

    #[must_use]
    pub const fn scroll_back(mut self, color: Rgba) -> Self {
        self.theme.scroll_back = color;
        self
    }

    #[must_use]
    pub const fn scroll_thumb(mut self, color: Rgba) -> Self {
        self.theme.scroll_thumb = color;
        self
    }

    #[must_use]
    pub const fn build(self) -> Theme {
        self.theme
    }
}

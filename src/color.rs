//! RGBA color type with alpha-mask blending.
//!
//! Colors are stored as 8-bit channels because the canvas is a plain pixel
//! buffer that gets copied verbatim to the presentation surface. Glyphs are
//! alpha masks, so the only compositing operation needed is "paint `fg`
//! through a coverage value onto `bg`".
//!
//! # Examples
//!
//! ```
//! use textframe::Rgba;
//!
//! let ink = Rgba::BLACK;
//! let paper = Rgba::WHITE;
//!
//! assert_eq!(ink.over(paper, 255), ink);
//! assert_eq!(ink.over(paper, 0), paper);
//! ```

use std::fmt;

/// RGBA color with 8-bit channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Pale yellow used for text backgrounds.
    pub const PALE_YELLOW: Self = Self::rgb(255, 255, 234);
    /// Dark yellow used for highlighted text backgrounds.
    pub const DARK_YELLOW: Self = Self::rgb(238, 238, 158);
    /// Grey-blue used for scrollbar thumbs.
    pub const MAUVE: Self = Self::rgb(0x99, 0x99, 0xDD);
    /// Muted khaki used for scrollbar troughs.
    pub const KHAKI: Self = Self::rgb(223, 223, 192);
    /// Medium grey.
    pub const GRAY: Self = Self::rgb(66, 66, 66);

    /// Create a color from all four channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Paint `self` onto `bg` with the given coverage (0 = none, 255 = full).
    ///
    /// The color's own alpha scales the coverage, so a half-transparent ink
    /// at full coverage lands halfway between the two colors.
    #[must_use]
    pub fn over(self, bg: Self, coverage: u8) -> Self {
        let k = u32::from(coverage) * u32::from(self.a) / 255;
        if k == 0 {
            return bg;
        }
        if k == 255 {
            return Self { a: 255, ..self };
        }
        let mix = |f: u8, b: u8| -> u8 {
            let v = (u32::from(f) * k + u32::from(b) * (255 - k) + 127) / 255;
            v as u8
        };
        Self {
            r: mix(self.r, bg.r),
            g: mix(self.g, bg.g),
            b: mix(self.b, bg.b),
            a: bg.a.max(k as u8),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

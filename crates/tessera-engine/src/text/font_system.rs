use std::collections::HashMap;
use std::fmt;

use crate::coords::{Rect, Vec2};

/// Line height as a multiple of the font size when no font metrics are available.
const FALLBACK_LINE_HEIGHT: f32 = 1.25;
/// Average advance as a multiple of the font size when no font metrics are available.
const FALLBACK_ADVANCE: f32 = 0.5;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Horizontal anchoring of a single text line relative to its origin.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TextAlign {
    /// Origin is the left edge.
    #[default]
    Left,
    /// Origin is the horizontal center.
    Center,
    /// Origin is the right edge.
    Right,
}

/// Owns the loaded fonts and answers measurement queries.
///
/// Fonts can be registered under a name ("sans", "mono", ...) so theme data can
/// refer to them without holding ids.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
    names: HashMap<String, FontId>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new(), names: HashMap::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        log::debug!("loaded font {id:?}");
        Ok(id)
    }

    /// Like [`load_font`](Self::load_font) and registers the font under `name`.
    ///
    /// Re-registering a name points it at the new font.
    pub fn load_named_font(
        &mut self,
        name: impl Into<String>,
        bytes: &[u8],
    ) -> Result<FontId, FontLoadError> {
        let id = self.load_font(bytes)?;
        let name = name.into();
        log::debug!("font {id:?} registered as {name:?}");
        self.names.insert(name, id);
        Ok(id)
    }

    /// Looks up a font registered with [`load_named_font`](Self::load_named_font).
    #[inline]
    pub fn font_id(&self, name: &str) -> Option<FontId> {
        self.names.get(name).copied()
    }

    #[inline]
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Computes the size of a laid-out string.
    ///
    /// Empty text is `(0, 0)`. An unknown font falls back to fixed per-character
    /// metrics so layout still produces stable, non-zero sizes.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: Option<FontId>, size: f32, max_width: Option<f32>) -> Vec2 {
        use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

        if text.is_empty() {
            return Vec2::zero();
        }

        let Some(font) = id.and_then(|id| self.get(id)) else {
            return fallback_metrics(text, size, max_width);
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings { max_width, ..LayoutSettings::default() });
        layout.append(&[font], &TextStyle::new(text, size, 0));

        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Vec2::new(0.0, size * FALLBACK_LINE_HEIGHT);
        }

        // Advance extent rather than bitmap extent: fontdue wraps on advances, so
        // a measured width fed back as max_width must not wrap again.
        let w = glyphs
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let h = glyphs.iter().map(|g| g.y + g.height as f32).fold(size, f32::max);
        Vec2::new(w, h)
    }

    /// Bounds of a single text line anchored at the origin, in the anchor's space.
    ///
    /// `align` moves the box left of the anchor for centered/right text.
    #[must_use]
    pub fn text_bounds(&self, text: &str, font: &str, size: f32, align: TextAlign) -> Rect {
        let extent = self.measure_text(text, self.font_id(font), size, None);
        let x = match align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -extent.x / 2.0,
            TextAlign::Right => -extent.x,
        };
        Rect::from_origin_size(Vec2::new(x, 0.0), extent)
    }

    /// Size of a text block wrapped at `max_width`.
    #[must_use]
    pub fn text_box_bounds(&self, text: &str, font: &str, size: f32, max_width: f32) -> Vec2 {
        self.measure_text(text, self.font_id(font), size, Some(max_width.max(0.0)))
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn fallback_metrics(text: &str, size: f32, max_width: Option<f32>) -> Vec2 {
    let advance = size * FALLBACK_ADVANCE;
    let line_height = size * FALLBACK_LINE_HEIGHT;
    let width = text.chars().count() as f32 * advance;

    match max_width {
        Some(max) if max > 0.0 && width > max => {
            let per_line = (max / advance).floor().max(1.0);
            let lines = (text.chars().count() as f32 / per_line).ceil();
            Vec2::new(per_line * advance, lines * line_height)
        }
        _ => Vec2::new(width, line_height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_measures_zero() {
        let fonts = FontSystem::new();
        assert_eq!(fonts.measure_text("", None, 16.0, None), Vec2::zero());
        assert_eq!(fonts.text_bounds("", "sans", 16.0, TextAlign::Center), Rect::default());
    }

    #[test]
    fn unknown_font_uses_fallback_metrics() {
        let fonts = FontSystem::new();
        let size = fonts.measure_text("abcd", Some(FontId(7)), 10.0, None);
        assert_eq!(size, Vec2::new(20.0, 12.5));
    }

    #[test]
    fn text_bounds_respects_alignment() {
        let fonts = FontSystem::new();
        let left = fonts.text_bounds("abcd", "sans", 10.0, TextAlign::Left);
        let center = fonts.text_bounds("abcd", "sans", 10.0, TextAlign::Center);
        let right = fonts.text_bounds("abcd", "sans", 10.0, TextAlign::Right);
        assert_eq!(left.origin.x, 0.0);
        assert_eq!(center.origin.x, -10.0);
        assert_eq!(right.origin.x, -20.0);
        assert_eq!(left.size, center.size);
    }

    #[test]
    fn text_box_bounds_wraps() {
        let fonts = FontSystem::new();
        // 10 chars at 5px each = 50px; wrapped at 30px -> 6 chars per line, 2 lines.
        let size = fonts.text_box_bounds("abcdefghij", "sans", 10.0, 30.0);
        assert_eq!(size, Vec2::new(30.0, 25.0));
    }

    #[test]
    fn garbage_bytes_fail_to_load() {
        let mut fonts = FontSystem::new();
        let err = fonts.load_named_font("sans", b"not a font").unwrap_err();
        assert!(err.to_string().starts_with("font load error"));
        assert_eq!(fonts.font_id("sans"), None);
        assert_eq!(fonts.font_count(), 0);
    }
}

use crate::coords::{CornerRadii, Rect, Vec2};
use crate::paint::{Color, Paint};
use crate::text::{FontId, TextAlign};

// ── Border ────────────────────────────────────────────────────────────────

/// Stroke drawn along the outer edge of a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

// ── Payloads ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub paint: Paint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectCmd {
    pub rect: Rect,
    pub radii: CornerRadii,
    pub paint: Paint,
    pub border: Option<Border>,
}

/// Straight stroke from `from` to `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: Option<FontId>,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Anchor point; its meaning on X depends on `align`.
    pub origin: Vec2,
    pub align: TextAlign,
    /// Wrapping width in logical pixels. `None` = no wrapping.
    pub max_width: Option<f32>,
}

// ── DrawCmd ───────────────────────────────────────────────────────────────

/// Renderer-agnostic draw command.
///
/// All geometry is stored in absolute coordinates: [`DrawList::push`] applies
/// the active translation before recording.
///
/// [`DrawList::push`]: super::DrawList::push
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    RoundedRect(RoundedRectCmd),
    Line(LineCmd),
    Text(TextCmd),
}

impl DrawCmd {
    /// Moves every coordinate of the command by `offset`.
    pub fn translate(&mut self, offset: Vec2) {
        match self {
            DrawCmd::Rect(c) => {
                c.rect = c.rect.translate(offset);
                translate_paint(&mut c.paint, offset);
            }
            DrawCmd::RoundedRect(c) => {
                c.rect = c.rect.translate(offset);
                translate_paint(&mut c.paint, offset);
            }
            DrawCmd::Line(c) => {
                c.from += offset;
                c.to += offset;
            }
            DrawCmd::Text(c) => c.origin += offset,
        }
    }

    /// Axis-aligned bounds of the geometry, if it has a cheap closed form.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            DrawCmd::Rect(c) => Some(c.rect),
            DrawCmd::RoundedRect(c) => Some(c.rect),
            DrawCmd::Line(c) => {
                let min = c.from.min(c.to);
                let max = c.from.max(c.to);
                Some(Rect::from_origin_size(min, max - min))
            }
            DrawCmd::Text(_) => None,
        }
    }
}

fn translate_paint(paint: &mut Paint, offset: Vec2) {
    if let Paint::LinearGradient(g) = paint {
        *g = g.translated(offset);
    }
}

use taffy::{AlignItems, AlignSelf, JustifyContent};

use crate::{Color, Size};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
    pub radius: f32,
}

/// Padding on each edge, in logical units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Insets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Insets {
    pub const fn uniform(v: f32) -> Self {
        Self::symmetric(v, v)
    }

    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            left: horizontal,
            top: vertical,
            right: horizontal,
            bottom: vertical,
        }
    }

    /// Shrink `rect` by these insets, never below zero size.
    pub fn shrink(&self, rect: crate::Rect) -> crate::Rect {
        crate::Rect {
            x: rect.x + self.left,
            y: rect.y + self.top,
            w: (rect.w - self.left - self.right).max(0.0),
            h: (rect.h - self.top - self.bottom).max(0.0),
        }
    }
}

/// How much of the parent a view claims before flex sizing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Fill {
    #[default]
    None,
    Width,
    Both,
}

/// Layout and decoration attached to a [`crate::View`]. All lengths are in
/// logical units; the paint pass maps them onto taffy styles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Modifier {
    pub fill: Fill,
    pub size: Option<Size>,
    pub height: Option<f32>,
    pub min_height: Option<f32>,
    pub max_width: Option<f32>,
    pub padding: Insets,
    pub gap: Option<f32>,
    pub background: Option<Color>,
    pub border: Option<Border>,
    /// Corner radius for the background and clip.
    pub radius: Option<f32>,
    pub flex_grow: Option<f32>,
    pub align_self: Option<AlignSelf>,
    pub align_items: Option<AlignItems>,
    pub justify_content: Option<JustifyContent>,
    pub alpha: Option<f32>,
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill_max_size(self) -> Self {
        Self {
            fill: Fill::Both,
            ..self
        }
    }

    pub fn fill_max_width(self) -> Self {
        Self {
            fill: Fill::Width,
            ..self
        }
    }

    pub fn size(self, width: f32, height: f32) -> Self {
        Self {
            size: Some(Size { width, height }),
            ..self
        }
    }

    pub fn height(self, h: f32) -> Self {
        Self {
            height: Some(h),
            ..self
        }
    }

    pub fn min_height(self, h: f32) -> Self {
        Self {
            min_height: Some(h),
            ..self
        }
    }

    pub fn max_width(self, w: f32) -> Self {
        Self {
            max_width: Some(w),
            ..self
        }
    }

    pub fn padding(self, v: f32) -> Self {
        self.insets(Insets::uniform(v))
    }

    pub fn insets(self, padding: Insets) -> Self {
        Self { padding, ..self }
    }

    pub fn gap(self, g: f32) -> Self {
        Self {
            gap: Some(g),
            ..self
        }
    }

    pub fn background(self, color: Color) -> Self {
        Self {
            background: Some(color),
            ..self
        }
    }

    pub fn border(self, width: f32, color: Color, radius: f32) -> Self {
        Self {
            border: Some(Border {
                width,
                color,
                radius,
            }),
            ..self
        }
    }

    pub fn rounded(self, radius: f32) -> Self {
        Self {
            radius: Some(radius),
            ..self
        }
    }

    pub fn flex_grow(self, g: f32) -> Self {
        Self {
            flex_grow: Some(g),
            ..self
        }
    }

    pub fn align_self(self, a: AlignSelf) -> Self {
        Self {
            align_self: Some(a),
            ..self
        }
    }

    pub fn align_items(self, a: AlignItems) -> Self {
        Self {
            align_items: Some(a),
            ..self
        }
    }

    pub fn justify_content(self, j: JustifyContent) -> Self {
        Self {
            justify_content: Some(j),
            ..self
        }
    }

    pub fn alpha(self, a: f32) -> Self {
        Self {
            alpha: Some(a),
            ..self
        }
    }
}

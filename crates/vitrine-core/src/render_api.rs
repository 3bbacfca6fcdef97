use crate::view::{Scene, SceneNode, TextStyle};
use crate::{Color, Rect};

/// The drawing capability the core calls into. Implementations own the
/// pixels (GPU, terminal, test recorder); the core only decides what to draw
/// and where.
pub trait Painter {
    fn clear(&mut self, _color: Color) {}
    fn rect(&mut self, rect: Rect, color: Color, radius: f32);
    fn border(&mut self, rect: Rect, color: Color, width: f32, radius: f32);
    fn text(&mut self, rect: Rect, text: &str, style: &TextStyle);
    /// An editable field; `text` is empty when only the hint should show.
    fn field(&mut self, rect: Rect, text: &str, hint: &str, style: &TextStyle);
    /// Draw `data` scaled into `rect`, keeping its aspect ratio.
    fn image(&mut self, rect: Rect, data: &[u8]);
    fn push_clip(&mut self, rect: Rect, radius: f32);
    fn pop_clip(&mut self);
}

impl Scene {
    /// Replay the draw list into `painter`, in order.
    pub fn replay(&self, painter: &mut dyn Painter) {
        painter.clear(self.clear_color);
        let mut clip_depth = 0usize;
        for node in &self.nodes {
            match node {
                SceneNode::Rect {
                    rect,
                    color,
                    radius,
                } => painter.rect(*rect, *color, *radius),
                SceneNode::Border {
                    rect,
                    color,
                    width,
                    radius,
                } => painter.border(*rect, *color, *width, *radius),
                SceneNode::Text { rect, text, style } => painter.text(*rect, text, style),
                SceneNode::Field {
                    rect,
                    text,
                    hint,
                    style,
                } => painter.field(*rect, text, hint, style),
                SceneNode::Image { rect, data } => painter.image(*rect, data),
                SceneNode::PushClip { rect, radius } => {
                    clip_depth += 1;
                    painter.push_clip(*rect, *radius);
                }
                SceneNode::PopClip => {
                    if clip_depth == 0 {
                        log::warn!("PopClip with empty stack");
                        continue;
                    }
                    clip_depth -= 1;
                    painter.pop_clip();
                }
            }
        }
        while clip_depth > 0 {
            log::warn!("unbalanced PushClip at end of scene");
            painter.pop_clip();
            clip_depth -= 1;
        }
    }
}

//! Layout (Taffy 0.9) and paint.
//!
//! Every container lays out as a flex column. Text, buttons and fields are
//! measured with approximate glyph metrics, so a host painter with real
//! fonts may render slightly narrower or wider text than was measured.

use std::collections::HashMap;

use taffy::prelude::{
    AvailableSpace, Dimension, Display, FlexDirection, LengthPercentage, NodeId, Style, TaffyTree,
    length, percent,
};
use taffy::{Overflow, Point};
use vitrine_core::{
    Callback, Fill, Modifier, Rect, Scene, SceneNode, Size, TextAlign, TextCallback, TextStyle, View,
    ViewId, ViewKind,
};

use crate::error::PaintError;
use crate::render::LAYOUT_BACKGROUND;
use crate::textfield::{approx_width, line_height, mask, wrap_lines};

/// Interactive area produced by the paint pass, in frame coordinates.
#[derive(Clone)]
pub struct HitRegion {
    pub id: ViewId,
    pub rect: Rect,
    pub key: Option<String>,
    pub on_click: Option<Callback>,
    pub on_text_change: Option<TextCallback>,
    /// Current field text, so hosts can seed their edit buffer.
    pub text: Option<String>,
}

impl std::fmt::Debug for HitRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRegion")
            .field("id", &self.id)
            .field("rect", &self.rect)
            .field("key", &self.key)
            .field("clickable", &self.on_click.is_some())
            .field("editable", &self.on_text_change.is_some())
            .finish()
    }
}

/// One laid-out, painted frame.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub scene: Scene,
    pub hit_regions: Vec<HitRegion>,
}

impl Frame {
    /// Topmost region under `pos`, preferring the last painted.
    pub fn hit_at(&self, x: f32, y: f32) -> Option<&HitRegion> {
        let p = vitrine_core::Vec2 { x, y };
        self.hit_regions.iter().rev().find(|h| h.rect.contains(p))
    }

    pub fn hit_by_key(&self, key: &str) -> Option<&HitRegion> {
        self.hit_regions
            .iter()
            .find(|h| h.key.as_deref() == Some(key))
    }
}

#[derive(Clone)]
enum NodeCtx {
    Text {
        text: String,
        size: f32,
        soft_wrap: bool,
    },
    Button {
        label: String,
        size: f32,
    },
    TextField {
        size: f32,
    },
    Container,
}

fn style_from_modifier(m: &Modifier, kind: &ViewKind) -> Style {
    let mut s = Style::default();
    s.display = Display::Flex;

    let is_container = matches!(
        kind,
        ViewKind::Surface | ViewKind::Box | ViewKind::Column | ViewKind::ScrollV
    );
    if is_container {
        s.flex_direction = FlexDirection::Column;
        s.align_items = Some(
            m.align_items.unwrap_or(taffy::AlignItems::Stretch),
        );
    }
    s.justify_content = m.justify_content;
    s.align_self = m.align_self;

    if let Some(g) = m.flex_grow {
        s.flex_grow = g;
    }
    if let Some(g) = m.gap {
        s.gap = taffy::geometry::Size {
            width: length(0.0),
            height: length(g),
        };
    }

    s.padding = taffy::geometry::Rect {
        left: LengthPercentage::length(m.padding.left),
        right: LengthPercentage::length(m.padding.right),
        top: LengthPercentage::length(m.padding.top),
        bottom: LengthPercentage::length(m.padding.bottom),
    };

    match m.fill {
        Fill::None => {}
        Fill::Width => s.size.width = percent(1.0),
        Fill::Both => {
            s.size.width = percent(1.0);
            s.size.height = percent(1.0);
        }
    }
    if let Some(sz) = m.size {
        s.size.width = Dimension::length(sz.width);
        s.size.height = Dimension::length(sz.height);
    }
    if let Some(h) = m.height {
        s.size.height = Dimension::length(h);
    }
    if let Some(h) = m.min_height {
        s.min_size.height = Dimension::length(h);
    }
    if let Some(w) = m.max_width {
        s.max_size.width = Dimension::length(w);
    }

    if matches!(kind, ViewKind::ScrollV) {
        s.overflow = Point {
            x: Overflow::Hidden,
            y: Overflow::Scroll,
        };
    }
    s
}

fn build_node(
    v: &View,
    t: &mut TaffyTree<NodeCtx>,
    nodes: &mut HashMap<ViewId, NodeId>,
) -> Result<NodeId, PaintError> {
    let style = style_from_modifier(&v.modifier, &v.kind);

    let node = match &v.kind {
        ViewKind::Text {
            text,
            style: ts,
            soft_wrap,
            ..
        } => t.new_leaf_with_context(
            style,
            NodeCtx::Text {
                text: text.clone(),
                size: ts.size,
                soft_wrap: *soft_wrap,
            },
        )?,
        ViewKind::Button {
            text, style: ts, ..
        } => t.new_leaf_with_context(
            style,
            NodeCtx::Button {
                label: text.clone(),
                size: ts.size,
            },
        )?,
        ViewKind::TextField { style: ts, .. } => {
            t.new_leaf_with_context(style, NodeCtx::TextField { size: ts.size })?
        }
        ViewKind::Image { .. } => t.new_leaf_with_context(style, NodeCtx::Container)?,
        ViewKind::Surface | ViewKind::Box | ViewKind::Column | ViewKind::ScrollV => {
            let children = v
                .children
                .iter()
                .map(|c| build_node(c, t, nodes))
                .collect::<Result<Vec<_>, _>>()?;
            let n = t.new_with_children(style, &children)?;
            t.set_node_context(n, Some(NodeCtx::Container))?;
            n
        }
    };

    nodes.insert(v.id, node);
    Ok(node)
}

fn measure(
    known: taffy::geometry::Size<Option<f32>>,
    avail: taffy::geometry::Size<AvailableSpace>,
    ctx: Option<&mut NodeCtx>,
) -> taffy::geometry::Size<f32> {
    match ctx {
        Some(NodeCtx::Text {
            text,
            size,
            soft_wrap,
        }) => {
            let wrap_w = known.width.or(match avail.width {
                AvailableSpace::Definite(w) if *soft_wrap => Some(w),
                _ => None,
            });
            let lines = wrap_lines(text, *size, wrap_w.filter(|_| *soft_wrap));
            let natural = lines
                .iter()
                .map(|l| approx_width(l, *size))
                .fold(0.0, f32::max);
            taffy::geometry::Size {
                width: known.width.unwrap_or(natural),
                height: line_height(*size) * lines.len().max(1) as f32,
            }
        }
        Some(NodeCtx::Button { label, size }) => taffy::geometry::Size {
            width: approx_width(label, *size),
            height: line_height(*size),
        },
        Some(NodeCtx::TextField { size }) => taffy::geometry::Size {
            width: known.width.unwrap_or(220.0),
            height: line_height(*size),
        },
        Some(NodeCtx::Container) | None => taffy::geometry::Size::ZERO,
    }
}

fn layout_of(node: NodeId, t: &TaffyTree<NodeCtx>) -> Result<Rect, PaintError> {
    let l = t.layout(node)?;
    Ok(Rect {
        x: l.location.x,
        y: l.location.y,
        w: l.size.width,
        h: l.size.height,
    })
}

fn faded(style: &TextStyle, alpha: f32) -> TextStyle {
    TextStyle {
        color: style.color.mul_alpha(alpha),
        ..*style
    }
}

struct Painted<'a> {
    tree: &'a TaffyTree<NodeCtx>,
    nodes: &'a HashMap<ViewId, NodeId>,
    scene: Scene,
    hits: Vec<HitRegion>,
}

impl Painted<'_> {
    fn walk(
        &mut self,
        v: &View,
        offset: (f32, f32),
        alpha: f32,
        clip: Option<Rect>,
    ) -> Result<(), PaintError> {
        let Some(&node) = self.nodes.get(&v.id) else {
            return Ok(());
        };
        let local = layout_of(node, self.tree)?;
        let rect = local.translate(offset.0, offset.1);
        let content = v.modifier.padding.shrink(rect);
        let radius = v.modifier.radius.unwrap_or(0.0);

        let alpha = (alpha * v.modifier.alpha.unwrap_or(1.0)).clamp(0.0, 1.0);

        if let Some(bg) = v.modifier.background {
            self.scene.nodes.push(SceneNode::Rect {
                rect,
                color: bg.mul_alpha(alpha),
                radius,
            });
        }
        if let Some(b) = &v.modifier.border {
            self.scene.nodes.push(SceneNode::Border {
                rect,
                color: b.color.mul_alpha(alpha),
                width: b.width,
                radius: b.radius.max(radius),
            });
        }

        let clipped = |r: Rect| match clip {
            Some(c) => r.intersect(&c),
            None => Some(r),
        };

        match &v.kind {
            ViewKind::Text {
                text,
                style,
                align,
                soft_wrap,
            } => {
                let lh = line_height(style.size);
                let lines = wrap_lines(text, style.size, soft_wrap.then_some(content.w));
                for (i, line) in lines.into_iter().enumerate() {
                    let w = approx_width(&line, style.size).min(content.w);
                    let dx = match align {
                        Some(TextAlign::Center) => (content.w - w) / 2.0,
                        Some(TextAlign::End) => content.w - w,
                        _ => 0.0,
                    };
                    self.scene.nodes.push(SceneNode::Text {
                        rect: Rect {
                            x: content.x + dx.max(0.0),
                            y: content.y + i as f32 * lh,
                            w,
                            h: lh,
                        },
                        text: line,
                        style: faded(style, alpha),
                    });
                }
            }
            ViewKind::Button {
                text,
                style,
                on_click,
            } => {
                let w = approx_width(text, style.size).min(rect.w);
                let h = line_height(style.size);
                self.scene.nodes.push(SceneNode::Text {
                    rect: Rect {
                        x: rect.x + (rect.w - w) / 2.0,
                        y: rect.y + (rect.h - h) / 2.0,
                        w,
                        h,
                    },
                    text: text.clone(),
                    style: faded(style, alpha),
                });
                if let Some(cb) = on_click
                    && let Some(r) = clipped(rect)
                {
                    self.hits.push(HitRegion {
                        id: v.id,
                        rect: r,
                        key: v.key.clone(),
                        on_click: Some(cb.clone()),
                        on_text_change: None,
                        text: None,
                    });
                }
            }
            ViewKind::TextField {
                hint,
                value,
                masked,
                style,
                on_change,
                ..
            } => {
                let shown = if *masked { mask(value) } else { value.clone() };
                self.scene.nodes.push(SceneNode::Field {
                    rect: content,
                    text: shown,
                    hint: hint.clone(),
                    style: faded(style, alpha),
                });
                if let Some(r) = clipped(rect) {
                    self.hits.push(HitRegion {
                        id: v.id,
                        rect: r,
                        key: v.key.clone(),
                        on_click: None,
                        on_text_change: on_change.clone(),
                        text: Some(value.clone()),
                    });
                }
            }
            ViewKind::Image { data } => {
                self.scene.nodes.push(SceneNode::Image {
                    rect,
                    data: data.clone(),
                });
            }
            ViewKind::ScrollV => {
                let vp = content;
                self.scene.nodes.push(SceneNode::PushClip { rect: vp, radius });
                let inner_clip = match clip {
                    Some(c) => c.intersect(&vp),
                    None => Some(vp),
                };
                // Fully clipped viewports still paint into an empty clip.
                let inner_clip = inner_clip.unwrap_or(Rect { w: 0.0, h: 0.0, ..vp });
                for c in &v.children {
                    self.walk(c, (rect.x, rect.y), alpha, Some(inner_clip))?;
                }
                self.scene.nodes.push(SceneNode::PopClip);
                return Ok(());
            }
            ViewKind::Surface | ViewKind::Box | ViewKind::Column => {}
        }

        for c in &v.children {
            self.walk(c, (rect.x, rect.y), alpha, clip)?;
        }
        Ok(())
    }
}

/// Assign preorder ids starting at 1.
fn stamp(mut v: View, next: &mut ViewId) -> View {
    v.id = *next;
    *next += 1;
    v.children = v.children.into_iter().map(|c| stamp(c, next)).collect();
    v
}

/// Lay `root` out in a viewport of `size` and paint it.
pub fn layout_and_paint(root: &View, size: Size) -> Result<Frame, PaintError> {
    let mut next = 1;
    let root = stamp(root.clone(), &mut next);

    let mut tree: TaffyTree<NodeCtx> = TaffyTree::new();
    let mut nodes = HashMap::new();
    let root_node = build_node(&root, &mut tree, &mut nodes)?;

    let mut rs = tree.style(root_node)?.clone();
    rs.size.width = length(size.width);
    rs.size.height = length(size.height);
    tree.set_style(root_node, rs)?;

    let available = taffy::geometry::Size {
        width: AvailableSpace::Definite(size.width),
        height: AvailableSpace::Definite(size.height),
    };
    tree.compute_layout_with_measure(root_node, available, |known, avail, _node, ctx, _style| {
        measure(known, avail, ctx)
    })?;

    let mut painted = Painted {
        tree: &tree,
        nodes: &nodes,
        scene: Scene {
            clear_color: root.modifier.background.unwrap_or(LAYOUT_BACKGROUND),
            nodes: Vec::new(),
        },
        hits: Vec::new(),
    };
    painted.walk(&root, (0.0, 0.0), 1.0, None)?;

    log::trace!(
        "painted {} scene nodes, {} hit regions",
        painted.scene.nodes.len(),
        painted.hits.len()
    );
    Ok(Frame {
        scene: painted.scene,
        hit_regions: painted.hits,
    })
}

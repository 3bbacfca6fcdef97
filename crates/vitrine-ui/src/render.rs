//! Layout tree to view tree.
//!
//! [`Renderer`] owns the current layout and its decoded logo; each call to
//! [`Renderer::render`] walks the tree against a snapshot of the interaction
//! state and produces a fresh [`View`]. Nodes whose visibility gate fails are
//! skipped together with their subtree. Unknown and malformed nodes render
//! as a small diagnostic label instead of aborting the pass.

use std::rc::Rc;

use taffy::{AlignItems, AlignSelf};
use vitrine_core::{
    Color, FontFamily, FontWeight, Insets, Modifier, Role, Semantics, TextAlign,
    TextStyle, View, ViewKind,
};
use vitrine_layout::{
    Align, ButtonNode, ColumnNode, InputNode, LogoAsset, LogoNode, MoneyInputNode, NodeBase,
    ScrollNode, SpacerNode, TextNode, UiLayout, UiNode,
};

use crate::navigation::Dispatcher;
use crate::state::{DraftStore, InteractionState, PASSWORD_MIRROR_KEY, StateStore};
use crate::textfield::parse_cents;
use crate::visibility::gate_passes;

pub const TEXT_SIZE: f32 = 14.0;
pub const TEXT_COLOR: Color = Color::from_rgb(0x11, 0x18, 0x27);
pub const BUTTON_TINT: Color = Color::from_rgb(0x29, 0x62, 0xFF);
pub const BUTTON_TEXT_COLOR: Color = Color::WHITE;
pub const BUTTON_TEXT_SIZE: f32 = 16.0;
pub const BUTTON_RADIUS: f32 = 8.0;
pub const DISABLED_ALPHA: f32 = 0.4;
pub const SPACER_HEIGHT: f32 = 12.0;
pub const SCROLL_WEIGHT: f32 = 1.0;
pub const SCROLL_TEXT_SIZE: f32 = 12.0;
pub const FIELD_BORDER: Color = Color::from_rgb(0xDD, 0xDD, 0xDD);
pub const FIELD_RADIUS: f32 = 8.0;
pub const FIELD_TEXT_SIZE: f32 = 16.0;
pub const INPUT_MAX_WIDTH: f32 = 360.0;
pub const LOGO_WIDTH: f32 = 160.0;
pub const LOGO_HEIGHT: f32 = 80.0;
pub const MONEY_HINT: &str = "Amount";
pub const LAYOUT_BACKGROUND: Color = Color::WHITE;
pub const LOADING_TEXT: &str = "Loading UI…";
pub const DIAGNOSTIC_COLOR: Color = Color::from_rgb(0xDC, 0x26, 0x26);
pub const DIAGNOSTIC_TEXT_SIZE: f32 = 12.0;

#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Also copy password edits into [`PASSWORD_MIRROR_KEY`]. Off by default;
    /// only needed by layouts that read the mirror key directly.
    pub mirror_password: bool,
}

/// Everything one render pass reads.
pub struct RenderCtx<'a> {
    pub state: &'a InteractionState,
    pub store: &'a StateStore,
    pub dispatcher: &'a Dispatcher,
    pub drafts: &'a DraftStore,
    pub logo: Option<&'a LogoAsset>,
    pub options: &'a RenderOptions,
}

#[derive(Default)]
pub struct Renderer {
    layout: Option<Rc<UiLayout>>,
    logo: Option<LogoAsset>,
    drafts: DraftStore,
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            layout: None,
            logo: None,
            drafts: DraftStore::new(),
            options,
        }
    }

    /// Swap the layout. The logo side channel is decoded once here; a bad
    /// payload is logged and the logo simply does not render.
    pub fn set_layout(&mut self, layout: Option<Rc<UiLayout>>) {
        self.logo = layout.as_deref().and_then(|l| match l.decode_logo() {
            Ok(logo) => logo,
            Err(e) => {
                log::warn!("logo payload ignored: {e}");
                None
            }
        });
        self.layout = layout;
    }

    pub fn layout(&self) -> Option<&Rc<UiLayout>> {
        self.layout.as_ref()
    }

    pub fn logo(&self) -> Option<&LogoAsset> {
        self.logo.as_ref()
    }

    /// Money field edits. They outlive layout swaps the way an uncontrolled
    /// field keeps what was typed into it.
    pub fn drafts(&self) -> &DraftStore {
        &self.drafts
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render the whole screen: the loading placeholder while no layout is
    /// present, otherwise the root node on the layout background.
    pub fn render(&self, dispatcher: &Dispatcher) -> View {
        let Some(layout) = &self.layout else {
            return loading_placeholder();
        };
        let store = dispatcher.store();
        let state = store.snapshot();
        let ctx = RenderCtx {
            state: &state,
            store,
            dispatcher,
            drafts: &self.drafts,
            logo: self.logo.as_ref(),
            options: &self.options,
        };

        let bg = parse_color(layout.background.as_deref()).unwrap_or(LAYOUT_BACKGROUND);
        let children = render_node(&layout.root, &ctx).into_iter().collect();
        View::new(0, ViewKind::Surface)
            .modifier(Modifier::new().fill_max_size().background(bg))
            .with_children(children)
    }
}

pub fn loading_placeholder() -> View {
    let label = View::new(
        0,
        ViewKind::Text {
            text: LOADING_TEXT.to_string(),
            style: TextStyle {
                color: Color::WHITE,
                ..TextStyle::default()
            },
            align: Some(TextAlign::Center),
            soft_wrap: false,
        },
    )
    .semantics(Semantics::new(Role::Text).label(LOADING_TEXT));

    View::new(0, ViewKind::Surface)
        .modifier(
            Modifier::new()
                .fill_max_size()
                .background(Color::BLACK)
                .align_items(AlignItems::Center)
                .justify_content(taffy::JustifyContent::Center),
        )
        .with_children(vec![label])
}

/// Render one node, or `None` when it is hidden or has nothing to show.
pub fn render_node(node: &UiNode, ctx: &RenderCtx) -> Option<View> {
    if !gate_passes(node.base(), &ctx.state.flags) {
        return None;
    }
    let key = node.id().map(str::to_string);
    let view = match node {
        UiNode::Column(c) => column(c, ctx),
        UiNode::Text(t) => text(t, ctx),
        UiNode::Button(b) => button(b, ctx),
        UiNode::Spacer(s) => spacer(s),
        UiNode::Scroll(s) => scroll(s),
        UiNode::Logo(l) => logo(l, ctx)?,
        UiNode::InputMoney(m) => money_input(m, ctx),
        UiNode::InputText(i) => text_input(i, ctx),
        UiNode::InputPassword(i) => password_input(i, ctx),
        UiNode::Unknown { type_name, .. } => {
            diagnostic(format!("[unsupported node: {type_name}]"), None)
        }
        UiNode::Invalid {
            type_name, reason, ..
        } => diagnostic(format!("[invalid node: {type_name}]"), Some(reason)),
    };
    Some(view.key(key))
}

pub fn parse_color(raw: Option<&str>) -> Option<Color> {
    let raw = raw.filter(|s| !s.is_empty())?;
    let parsed = Color::parse_hex(raw);
    if parsed.is_none() {
        log::debug!("unrecognized color '{raw}'");
    }
    parsed
}

fn align_self(base: &NodeBase) -> Option<AlignSelf> {
    base.align.map(|a| match a {
        Align::Start => AlignSelf::FlexStart,
        Align::Center => AlignSelf::Center,
        Align::End => AlignSelf::FlexEnd,
        Align::Stretch => AlignSelf::Stretch,
    })
}

fn align_items(a: Align) -> AlignItems {
    match a {
        Align::Start => AlignItems::FlexStart,
        Align::Center => AlignItems::Center,
        Align::End => AlignItems::FlexEnd,
        Align::Stretch => AlignItems::Stretch,
    }
}

fn with_align_self(m: Modifier, base: &NodeBase) -> Modifier {
    match align_self(base) {
        Some(a) => m.align_self(a),
        None => m,
    }
}

fn column(c: &ColumnNode, ctx: &RenderCtx) -> View {
    let mut m = Modifier::new()
        .flex_grow(1.0)
        .fill_max_width()
        .min_height(0.0);
    if let Some(bg) = parse_color(c.background.as_deref()) {
        m = m.background(bg);
    }
    if let Some(p) = c.padding.filter(|p| *p > 0.0) {
        m = m.padding(p);
    }
    if let Some(g) = c.gap.filter(|g| *g > 0.0) {
        m = m.gap(g);
    }
    if let Some(a) = c.base.align {
        m = m.align_items(align_items(a));
    }

    let children = c
        .children
        .iter()
        .filter_map(|child| render_node(child, ctx))
        .collect();

    View::new(0, ViewKind::Column)
        .modifier(m)
        .with_children(children)
        .semantics(Semantics::new(Role::Container))
}

/// Static text, or the bound input's value once it has one.
fn resolve_text(t: &TextNode, state: &InteractionState) -> String {
    let bound = t
        .text_from_input_id
        .as_deref()
        .and_then(|id| state.input(id))
        .filter(|v| !v.is_empty());
    match (bound, t.text_template.as_deref()) {
        (Some(v), Some(tpl)) => tpl.replace("{value}", v),
        (Some(v), None) => v.to_string(),
        (None, _) => t.text.clone(),
    }
}

fn text(t: &TextNode, ctx: &RenderCtx) -> View {
    let content = resolve_text(t, ctx.state);
    let style = TextStyle {
        color: parse_color(t.color.as_deref()).unwrap_or(TEXT_COLOR),
        size: t.size.unwrap_or(TEXT_SIZE),
        weight: if t.bold == Some(true) {
            FontWeight::SemiBold
        } else {
            FontWeight::Regular
        },
        family: FontFamily::SansSerif,
    };
    let align = t.base.align.and_then(|a| match a {
        Align::Start => Some(TextAlign::Start),
        Align::Center => Some(TextAlign::Center),
        Align::End => Some(TextAlign::End),
        Align::Stretch => None,
    });

    View::new(
        0,
        ViewKind::Text {
            text: content.clone(),
            style,
            align,
            soft_wrap: true,
        },
    )
    .modifier(with_align_self(Modifier::new(), &t.base))
    .semantics(Semantics::new(Role::Text).label(content))
}

/// `enabled: false` always wins; otherwise a money gate, when present,
/// decides; otherwise the button is live.
pub fn button_enabled(b: &ButtonNode, state: &InteractionState) -> bool {
    if b.enabled == Some(false) {
        return false;
    }
    match b.enable_when_input_id.as_deref() {
        Some(id) => state
            .input(id)
            .and_then(parse_cents)
            .is_some_and(|cents| cents >= b.enable_when_min_cents.unwrap_or(0)),
        None => true,
    }
}

fn button(b: &ButtonNode, ctx: &RenderCtx) -> View {
    let enabled = button_enabled(b, ctx.state);
    let style = TextStyle {
        color: parse_color(b.text_color.as_deref()).unwrap_or(BUTTON_TEXT_COLOR),
        size: BUTTON_TEXT_SIZE,
        weight: FontWeight::Regular,
        family: FontFamily::SansSerif,
    };

    let on_click = enabled.then(|| {
        let dispatcher = ctx.dispatcher.clone();
        let action = b.action_id().to_string();
        Rc::new(move || {
            let outcome = dispatcher.click(&action);
            log::debug!("click '{action}' -> {outcome:?}");
        }) as vitrine_core::Callback
    });

    let mut m = Modifier::new()
        .background(parse_color(b.tint.as_deref()).unwrap_or(BUTTON_TINT))
        .insets(Insets::symmetric(16.0, 12.0))
        .rounded(BUTTON_RADIUS);
    if !enabled {
        m = m.alpha(DISABLED_ALPHA);
    }

    let mut sem = Semantics::new(Role::Button).label(b.text.clone()).enabled(enabled);
    if let Some(icon) = b.icon.as_deref().filter(|i| !i.is_empty()) {
        sem = sem.label(format!("{} ({icon})", b.text));
    }

    View::new(
        0,
        ViewKind::Button {
            text: b.text.clone(),
            style,
            on_click,
        },
    )
    .modifier(with_align_self(m, &b.base))
    .semantics(sem)
}

fn spacer(s: &SpacerNode) -> View {
    View::new(0, ViewKind::Box).modifier(
        Modifier::new()
            .fill_max_width()
            .height(s.height.unwrap_or(SPACER_HEIGHT)),
    )
}

fn scroll(s: &ScrollNode) -> View {
    let body = View::new(
        0,
        ViewKind::Text {
            text: s.text.clone(),
            style: TextStyle {
                color: parse_color(s.color.as_deref()).unwrap_or(TEXT_COLOR),
                size: SCROLL_TEXT_SIZE,
                weight: FontWeight::Regular,
                family: FontFamily::Monospace,
            },
            align: None,
            soft_wrap: true,
        },
    )
    .semantics(Semantics::new(Role::Text).label(s.text.clone()));

    let mut m = Modifier::new()
        .flex_grow(s.weight.unwrap_or(SCROLL_WEIGHT))
        .fill_max_width()
        .min_height(0.0)
        .border(1.0, FIELD_BORDER, FIELD_RADIUS)
        .rounded(FIELD_RADIUS);
    if let Some(p) = s.padding.filter(|p| *p > 0.0) {
        m = m.padding(p);
    }

    View::new(0, ViewKind::ScrollV)
        .modifier(with_align_self(m, &s.base))
        .with_children(vec![body])
        .semantics(Semantics::new(Role::Container))
}

fn logo(l: &LogoNode, ctx: &RenderCtx) -> Option<View> {
    let asset = ctx.logo?;
    let w = l.width.or(asset.meta.width).unwrap_or(LOGO_WIDTH);
    let h = l.height.or(asset.meta.height).unwrap_or(LOGO_HEIGHT);

    let image = View::new(
        0,
        ViewKind::Image {
            data: asset.data.clone(),
        },
    )
    .modifier(Modifier::new().size(w, h))
    .semantics(Semantics::new(Role::Image).label("logo"));

    let items = match l.base.align {
        Some(Align::Center) => AlignItems::Center,
        Some(Align::End) => AlignItems::FlexEnd,
        _ => AlignItems::FlexStart,
    };
    Some(
        View::new(0, ViewKind::Box)
            .modifier(Modifier::new().fill_max_width().align_items(items))
            .with_children(vec![image]),
    )
}

fn field_modifier(base: &NodeBase) -> Modifier {
    with_align_self(
        Modifier::new()
            .fill_max_width()
            .max_width(INPUT_MAX_WIDTH)
            .insets(Insets::symmetric(12.0, 10.0))
            .border(1.0, FIELD_BORDER, FIELD_RADIUS)
            .rounded(FIELD_RADIUS),
        base,
    )
}

fn field_style() -> TextStyle {
    TextStyle {
        color: TEXT_COLOR,
        size: FIELD_TEXT_SIZE,
        ..TextStyle::default()
    }
}

fn field(
    key: String,
    hint: String,
    value: String,
    masked: bool,
    base: &NodeBase,
    on_change: Option<vitrine_core::TextCallback>,
) -> View {
    let label = hint.clone();
    View::new(
        0,
        ViewKind::TextField {
            field_key: key,
            hint,
            value,
            masked,
            style: field_style(),
            on_change,
        },
    )
    .modifier(field_modifier(base))
    .semantics(Semantics::new(Role::TextField).label(label))
}

/// Seeded from the node. Edits land in the renderer's drafts, never in the
/// interaction state, so `inputs[id]` cannot change what this field shows.
fn money_input(m: &MoneyInputNode, ctx: &RenderCtx) -> View {
    let hint = m
        .hint
        .clone()
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| MONEY_HINT.to_string());
    let key = m
        .base
        .id
        .clone()
        .unwrap_or_else(|| "input_money".to_string());
    let value = ctx
        .drafts
        .get(&key)
        .or_else(|| m.value.clone())
        .unwrap_or_default();
    let drafts = ctx.drafts.clone();
    let on_change: vitrine_core::TextCallback = Rc::new(move |v: String| drafts.set(&key, v));
    field(String::new(), hint, value, false, &m.base, Some(on_change))
}

fn bound_value(id: &str, node: &InputNode, state: &InteractionState) -> String {
    state
        .input(id)
        .map(str::to_string)
        .or_else(|| node.value.clone())
        .unwrap_or_default()
}

fn text_input(i: &InputNode, ctx: &RenderCtx) -> View {
    let id = i.base.id.clone().unwrap_or_else(|| "input_text".to_string());
    let value = bound_value(&id, i, ctx.state);
    let store = ctx.store.clone();
    let key = id.clone();
    let on_change: vitrine_core::TextCallback = Rc::new(move |v: String| store.set_input(&key, v));
    field(
        id,
        i.hint.clone().unwrap_or_default(),
        value,
        false,
        &i.base,
        Some(on_change),
    )
}

fn password_input(i: &InputNode, ctx: &RenderCtx) -> View {
    let id = i
        .base
        .id
        .clone()
        .unwrap_or_else(|| "input_password".to_string());
    let value = bound_value(&id, i, ctx.state);
    let store = ctx.store.clone();
    let key = id.clone();
    let mirror = ctx.options.mirror_password;
    let on_change: vitrine_core::TextCallback = Rc::new(move |v: String| {
        if mirror {
            store.set_input(PASSWORD_MIRROR_KEY, v.clone());
        }
        store.set_input(&key, v);
    });
    field(
        id,
        i.hint.clone().unwrap_or_default(),
        value,
        true,
        &i.base,
        Some(on_change),
    )
}

fn diagnostic(text: String, reason: Option<&String>) -> View {
    if let Some(reason) = reason {
        log::debug!("{text}: {reason}");
    }
    let label = reason.cloned().unwrap_or_else(|| text.clone());
    View::new(
        0,
        ViewKind::Text {
            text,
            style: TextStyle {
                color: DIAGNOSTIC_COLOR,
                size: DIAGNOSTIC_TEXT_SIZE,
                ..TextStyle::default()
            },
            align: None,
            soft_wrap: true,
        },
    )
    .semantics(Semantics::new(Role::Alert).label(label))
}

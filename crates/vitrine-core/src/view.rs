use crate::{Color, Modifier, Rect};
use std::rc::Rc;

pub type ViewId = u64;

pub type Callback = Rc<dyn Fn()>;
pub type TextCallback = Rc<dyn Fn(String)>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Regular,
    SemiBold,
}

impl FontWeight {
    /// CSS-style numeric weight.
    pub fn value(self) -> u16 {
        match self {
            FontWeight::Regular => 400,
            FontWeight::SemiBold => 600,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontFamily {
    #[default]
    SansSerif,
    Monospace,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Center,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub size: f32,
    pub weight: FontWeight,
    pub family: FontFamily,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 14.0,
            weight: FontWeight::Regular,
            family: FontFamily::SansSerif,
        }
    }
}

#[derive(Clone)]
pub enum ViewKind {
    Surface,
    Box,
    Column,
    ScrollV,
    Text {
        text: String,
        style: TextStyle,
        align: Option<TextAlign>,
        /// Wrap at the container width; embedded `\n` always breaks.
        soft_wrap: bool,
    },
    Button {
        text: String,
        style: TextStyle,
        on_click: Option<Callback>,
    },
    TextField {
        /// Key into the interaction state, empty when the field is unbound.
        field_key: String,
        hint: String,
        value: String,
        masked: bool,
        style: TextStyle,
        on_change: Option<TextCallback>,
    },
    /// Scaled to fit its box, aspect ratio kept.
    Image {
        data: Rc<[u8]>,
    },
}

impl std::fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Surface => write!(f, "Surface"),
            ViewKind::Box => write!(f, "Box"),
            ViewKind::Column => write!(f, "Column"),
            ViewKind::ScrollV => write!(f, "ScrollV"),
            ViewKind::Text {
                text,
                style,
                align,
                soft_wrap,
            } => f
                .debug_struct("Text")
                .field("text", text)
                .field("style", style)
                .field("align", align)
                .field("soft_wrap", soft_wrap)
                .finish(),
            ViewKind::Button {
                text,
                style,
                on_click,
            } => f
                .debug_struct("Button")
                .field("text", text)
                .field("style", style)
                .field("on_click", &on_click.as_ref().map(|_| "<callback>"))
                .finish(),
            ViewKind::TextField {
                field_key,
                hint,
                value,
                masked,
                style,
                on_change,
            } => f
                .debug_struct("TextField")
                .field("field_key", field_key)
                .field("hint", hint)
                .field("value", value)
                .field("masked", masked)
                .field("style", style)
                .field("on_change", &on_change.as_ref().map(|_| "<callback>"))
                .finish(),
            ViewKind::Image { data } => f
                .debug_struct("Image")
                .field("bytes", &data.len())
                .finish(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct View {
    pub id: ViewId,
    /// Caller-chosen identity carried over from the source node, if any.
    pub key: Option<String>,
    pub kind: ViewKind,
    pub modifier: Modifier,
    pub children: Vec<View>,
    pub semantics: Option<crate::semantics::Semantics>,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        View {
            id,
            key: None,
            kind,
            modifier: Modifier::default(),
            children: vec![],
            semantics: None,
        }
    }
    pub fn modifier(mut self, m: Modifier) -> Self {
        self.modifier = m;
        self
    }
    pub fn key(mut self, key: Option<String>) -> Self {
        self.key = key;
        self
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
    pub fn semantics(mut self, s: crate::semantics::Semantics) -> Self {
        self.semantics = Some(s);
        self
    }

    /// Depth-first search by [`View::key`].
    pub fn find(&self, key: &str) -> Option<&View> {
        if self.key.as_deref() == Some(key) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(key))
    }

    /// Number of views in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(View::count).sum::<usize>()
    }
}

/// Renderable scene: an ordered list of draw commands.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub clear_color: Color,
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug)]
pub enum SceneNode {
    Rect {
        rect: Rect,
        color: Color,
        radius: f32,
    },
    Border {
        rect: Rect,
        color: Color,
        width: f32,
        radius: f32,
    },
    Text {
        rect: Rect,
        text: String,
        style: TextStyle,
    },
    Field {
        rect: Rect,
        /// Display text, already masked for password fields.
        text: String,
        hint: String,
        style: TextStyle,
    },
    Image {
        rect: Rect,
        data: Rc<[u8]>,
    },
    PushClip {
        rect: Rect,
        radius: f32,
    },
    PopClip,
}

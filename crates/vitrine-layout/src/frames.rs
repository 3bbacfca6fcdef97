//! Layout extraction from broker frames.
//!
//! Backends publish layouts in several shapes: a bare layout, a "style"
//! document listing screens, either of those under `content` or
//! `envelope.content`, or wrapped in a `cmd` with the payload inline, as a
//! JSON string, base64, or inside an attached `files[]` entry. Everything here
//! works on `serde_json::Value` and returns a layout `Value` ready for
//! [`crate::UiLayout::from_value`].

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};

use crate::LayoutError;

pub const DEFAULT_STYLE_BACKGROUND: &str = "#129ADA";
pub const STYLE_PADDING: f32 = 24.0;
pub const STYLE_GAP: f32 = 12.0;

fn parse_json_str(s: &str) -> Option<Value> {
    serde_json::from_str::<Value>(s).ok()
}

fn parse_base64_json(s: &str) -> Option<Value> {
    let bytes = STANDARD.decode(s.trim()).ok()?;
    let txt = String::from_utf8(bytes).ok()?;
    parse_json_str(&txt)
}

/// First non-whitespace byte opens an object or array.
pub fn looks_like_json(bytes: &[u8]) -> bool {
    matches!(
        bytes.iter().find(|c| !c.is_ascii_whitespace()),
        Some(b'{') | Some(b'[')
    )
}

fn is_style(v: &Value) -> bool {
    v.get("screens").is_some()
}

fn layout_or_style(content: &Value) -> Option<Value> {
    if content.get("root").is_some() {
        Some(content.clone())
    } else if is_style(content) {
        style_to_layout(content, None)
    } else {
        None
    }
}

/// Build a layout from one screen of a style document. Picks `screen_id`,
/// or the first screen when `None`.
pub fn style_to_layout(style: &Value, screen_id: Option<&str>) -> Option<Value> {
    let bg = style
        .get("background")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_STYLE_BACKGROUND);
    let screens = style.get("screens")?.as_array()?;
    let screen = match screen_id {
        Some(id) => screens
            .iter()
            .find(|s| s.get("id").and_then(Value::as_str) == Some(id)),
        None => screens.first(),
    }?;

    let children = screen.get("children").cloned().unwrap_or_else(|| json!([]));

    let mut layout = json!({
        "background": bg,
        "root": {
            "type": "column",
            "background": bg,
            "padding": STYLE_PADDING,
            "gap": STYLE_GAP,
            "children": children,
        }
    });

    if let Some(cd) = style.get("customer_display") {
        layout["customer_display"] = cd.clone();
    }
    if let Some(logo) = style.get("logo")
        && let Some(b64) = logo.get("base64").and_then(Value::as_str)
    {
        layout["__style_logo_base64"] = Value::String(b64.to_string());
        layout["__style_logo_meta"] = logo.clone();
    }

    Some(layout)
}

/// Find a style document among attached files. Files whose name mentions
/// "style" are tried first, then shorter names.
fn find_style_in_files(root: &Value) -> Option<Value> {
    let files = root.get("files")?.as_array()?;
    let mut candidates: Vec<&Value> = files.iter().collect();
    candidates.sort_by_key(|f| {
        let name = f.get("name").and_then(Value::as_str).unwrap_or("");
        let score = if name.to_ascii_lowercase().contains("style") {
            0
        } else {
            1
        };
        (score, name.len())
    });

    for f in candidates {
        if let Some(c) = f.get("content") {
            if is_style(c) {
                return Some(c.clone());
            }
            if let Some(v) = c.as_str().and_then(parse_json_str).filter(is_style) {
                return Some(v);
            }
        }
        if let Some(v) = f
            .get("text")
            .and_then(Value::as_str)
            .and_then(parse_json_str)
            .filter(is_style)
        {
            return Some(v);
        }
        for key in ["content_b64", "base64", "bytes_b64"] {
            if let Some(v) = f
                .get(key)
                .and_then(Value::as_str)
                .and_then(parse_base64_json)
                .filter(is_style)
            {
                return Some(v);
            }
        }
    }
    None
}

fn style_from_args(frame: &Value, args: &Value) -> Option<Value> {
    if let Some(style) = args.get("style") {
        return Some(style.clone());
    }
    if let Some(style) = args
        .get("style_json")
        .and_then(Value::as_str)
        .and_then(parse_json_str)
    {
        return Some(style);
    }
    if let Some(style) = args
        .get("data_base64")
        .and_then(Value::as_str)
        .and_then(parse_base64_json)
    {
        return Some(style);
    }
    find_style_in_files(frame)
}

/// Extract a layout from one decoded frame, trying every known shape.
pub fn extract_layout(v: &Value) -> Option<Value> {
    if v.get("root").is_some() {
        return Some(v.clone());
    }
    if let Some(layout) = v.get("content").and_then(layout_or_style) {
        return Some(layout);
    }
    if is_style(v) {
        return style_to_layout(v, None);
    }
    if let Some(layout) = v
        .get("envelope")
        .and_then(|e| e.get("content"))
        .and_then(layout_or_style)
    {
        return Some(layout);
    }

    let cmd = v.get("cmd")?;
    let name = cmd.get("name").and_then(Value::as_str).unwrap_or_default();
    let empty = json!({});
    let args = cmd.get("args").unwrap_or(&empty);
    log::debug!("frame carries command '{name}'");

    match name {
        "ui.apply" | "ui.update" => args
            .get("content")
            .and_then(layout_or_style)
            .or_else(|| v.get("content").and_then(layout_or_style)),
        "ui.style.apply" | "ui.style.update" => {
            style_from_args(v, args).and_then(|style| style_to_layout(&style, None))
        }
        _ => None,
    }
}

/// Try every JSON-looking frame of a multipart message in order; as a last
/// resort, look for a base64 style in the command args of the last JSON
/// frame regardless of the command name.
pub fn layout_from_frames<B: AsRef<[u8]>>(frames: &[B]) -> Result<Value, LayoutError> {
    let decoded: Vec<Value> = frames
        .iter()
        .map(|f| -> &[u8] { f.as_ref() })
        .filter(|b| looks_like_json(b))
        .filter_map(|b| std::str::from_utf8(b).ok())
        .filter_map(parse_json_str)
        .collect();

    if let Some(layout) = decoded.iter().find_map(extract_layout) {
        return Ok(layout);
    }

    let fallback = decoded
        .last()
        .and_then(|v| v.get("cmd"))
        .and_then(|cmd| cmd.get("args"))
        .and_then(|args| args.get("data_base64"))
        .and_then(Value::as_str)
        .and_then(parse_base64_json)
        .and_then(|style| style_to_layout(&style, None));

    fallback.ok_or(LayoutError::NoLayout {
        frames: frames.len(),
    })
}

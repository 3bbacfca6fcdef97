//! Plain-text outline of a view tree, for logs and snapshot tests.

use std::fmt::Write as _;

use vitrine_core::{View, ViewKind};

use crate::textfield::mask;

pub fn outline(v: &View) -> String {
    let mut out = String::new();
    write_view(v, 0, &mut out);
    out
}

fn write_view(v: &View, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    // Writing into a String cannot fail.
    let _ = match &v.kind {
        ViewKind::Surface => write!(out, "Surface"),
        ViewKind::Box => write!(out, "Box"),
        ViewKind::Column => write!(out, "Column"),
        ViewKind::ScrollV => write!(out, "ScrollV"),
        ViewKind::Text { text, .. } => write!(out, "Text {text:?}"),
        ViewKind::Button { text, on_click, .. } => {
            let state = if on_click.is_some() { "" } else { " (inert)" };
            write!(out, "Button {text:?}{state}")
        }
        ViewKind::TextField {
            field_key,
            value,
            masked,
            ..
        } => {
            let shown = if *masked { mask(value) } else { value.clone() };
            if field_key.is_empty() {
                write!(out, "TextField {shown:?} unbound")
            } else {
                write!(out, "TextField {shown:?} bound={field_key}")
            }
        }
        ViewKind::Image { data, .. } => write!(out, "Image {}B", data.len()),
    };
    if let Some(k) = &v.key {
        let _ = write!(out, " #{k}");
    }
    out.push('\n');
    for c in &v.children {
        write_view(c, depth + 1, out);
    }
}

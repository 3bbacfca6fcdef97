use std::rc::Rc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::node::{Align, UiNode, lenient, lenient_align, lenient_flag};
use crate::LayoutError;

/// Secondary (customer-facing) display block. Held alongside the primary
/// tree; rendering it is up to the host.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerDisplay {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    #[serde(
        default,
        deserialize_with = "lenient_align",
        skip_serializing_if = "Option::is_none"
    )]
    pub align: Option<Align>,
    #[serde(
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub use_logo: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
}

/// Size hints that travel with the logo bytes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LogoMeta {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

/// Decoded logo image plus its envelope-level size hints.
#[derive(Clone, Debug, PartialEq)]
pub struct LogoAsset {
    pub data: Rc<[u8]>,
    pub meta: LogoMeta,
}

/// The top-level layout envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiLayout {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub root: UiNode,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub customer_display: Option<CustomerDisplay>,
    #[serde(
        default,
        rename = "__style_logo_base64",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub logo_base64: Option<String>,
    #[serde(
        default,
        rename = "__style_logo_meta",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub logo_meta: Option<LogoMeta>,
}

impl UiLayout {
    pub fn new(root: UiNode) -> Self {
        Self {
            background: None,
            root,
            customer_display: None,
            logo_base64: None,
            logo_meta: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn from_value(value: Value) -> Result<Self, LayoutError> {
        let Some(obj) = value.as_object() else {
            return Err(LayoutError::NotAnObject);
        };
        if obj.get("root").is_none_or(Value::is_null) {
            return Err(LayoutError::MissingRoot);
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode the side-channel logo. `Ok(None)` when the envelope carries none.
    pub fn decode_logo(&self) -> Result<Option<LogoAsset>, LayoutError> {
        let Some(raw) = self.logo_base64.as_deref() else {
            return Ok(None);
        };
        let raw = raw.trim();
        // Tolerate data URLs.
        let payload = match raw.split_once(";base64,") {
            Some((prefix, rest)) if prefix.starts_with("data:") => rest,
            _ => raw,
        };
        if payload.is_empty() {
            return Ok(None);
        }
        let bytes = STANDARD.decode(payload)?;
        Ok(Some(LogoAsset {
            data: bytes.into(),
            meta: self.logo_meta.clone().unwrap_or_default(),
        }))
    }

    /// Walk the tree depth-first, parents before children.
    pub fn walk(&self, f: &mut dyn FnMut(&UiNode)) {
        fn go(n: &UiNode, f: &mut dyn FnMut(&UiNode)) {
            f(n);
            for c in n.children() {
                go(c, f);
            }
        }
        go(&self.root, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_envelope_with_side_channels() {
        let layout = UiLayout::from_value(json!({
            "background": "#FFFFFF",
            "root": { "type": "column", "children": [ { "type": "logo" } ] },
            "customer_display": { "text": "Welcome", "size": 24, "align": "center", "use_logo": true, "bg_color": "#000000" },
            "__style_logo_base64": "iVBORw0KGgo=",
            "__style_logo_meta": { "width": 120, "height": 40, "base64": "ignored" }
        }))
        .unwrap();

        assert_eq!(layout.background.as_deref(), Some("#FFFFFF"));
        let cd = layout.customer_display.as_ref().unwrap();
        assert_eq!(cd.align, Some(Align::Center));
        assert_eq!(cd.use_logo, Some(true));

        let logo = layout.decode_logo().unwrap().unwrap();
        assert_eq!(&logo.data[..4], &[0x89, b'P', b'N', b'G']);
        assert_eq!(logo.meta.width, Some(120.0));
        assert_eq!(logo.meta.height, Some(40.0));
    }

    #[test]
    fn sloppy_side_channels_do_not_reject_the_layout() {
        let layout = UiLayout::from_value(json!({
            "background": 12,
            "root": { "type": "text", "text": "x" },
            "customer_display": { "text": "Hi", "size": "large", "use_logo": "true" },
            "__style_logo_base64": "AAEC",
            "__style_logo_meta": { "width": "wide", "height": 40 }
        }))
        .unwrap();
        assert_eq!(layout.background, None);
        let cd = layout.customer_display.as_ref().unwrap();
        assert_eq!((cd.size, cd.use_logo), (None, Some(true)));
        let logo = layout.decode_logo().unwrap().unwrap();
        assert_eq!(logo.meta.width, None);
        assert_eq!(logo.meta.height, Some(40.0));
    }

    #[test]
    fn logo_accepts_data_url_and_reports_garbage() {
        let mut layout = UiLayout::new(UiNode::from_value(json!({ "type": "spacer" })));
        assert!(layout.decode_logo().unwrap().is_none());

        layout.logo_base64 = Some("data:image/png;base64,AAEC".into());
        assert_eq!(&*layout.decode_logo().unwrap().unwrap().data, &[0u8, 1, 2]);

        layout.logo_base64 = Some("!!not base64!!".into());
        assert!(matches!(
            layout.decode_logo(),
            Err(LayoutError::LogoEncoding(_))
        ));
    }

    #[test]
    fn rejects_rootless_and_non_object_documents() {
        assert!(matches!(
            UiLayout::from_json(r##"{ "background": "#000" }"##),
            Err(LayoutError::MissingRoot)
        ));
        assert!(matches!(
            UiLayout::from_json("[1, 2]"),
            Err(LayoutError::NotAnObject)
        ));
        assert!(matches!(
            UiLayout::from_json("{ not json"),
            Err(LayoutError::Json(_))
        ));
    }

    #[test]
    fn walk_visits_every_node() {
        let layout = UiLayout::from_value(json!({
            "root": { "type": "column", "children": [
                { "type": "text", "text": "a" },
                { "type": "column", "children": [ { "type": "foo" } ] }
            ] }
        }))
        .unwrap();
        let mut seen = vec![];
        layout.walk(&mut |n| seen.push(n.type_name().to_string()));
        assert_eq!(seen, vec!["column", "text", "column", "foo"]);
    }

    #[test]
    fn json_round_trip_keeps_side_channel_keys() {
        let src = json!({
            "root": { "type": "text", "text": "x" },
            "__style_logo_base64": "AAEC"
        });
        let layout = UiLayout::from_value(src).unwrap();
        let out: Value = serde_json::from_str(&layout.to_json().unwrap()).unwrap();
        assert_eq!(out["__style_logo_base64"], "AAEC");
        assert_eq!(out["root"]["type"], "text");
    }
}

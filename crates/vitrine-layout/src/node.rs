use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Start,
    Center,
    End,
    Stretch,
}

impl Align {
    pub fn parse(s: &str) -> Option<Align> {
        match s {
            "start" => Some(Align::Start),
            "center" => Some(Align::Center),
            "end" => Some(Align::End),
            "stretch" => Some(Align::Stretch),
            _ => None,
        }
    }
}

/// Unknown alignment keywords are dropped instead of failing the node.
pub(crate) fn lenient_align<'de, D>(d: D) -> Result<Option<Align>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(d)?;
    Ok(match raw {
        Some(Value::String(s)) => {
            let parsed = Align::parse(&s);
            if parsed.is_none() {
                log::debug!("ignoring unknown align '{s}'");
            }
            parsed
        }
        _ => None,
    })
}

/// Null or mistyped values fall back to the field's default instead of
/// failing the whole node.
pub(crate) fn lenient<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Value::deserialize(d)?;
    if raw.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(raw).unwrap_or_else(|e| {
        log::warn!("ignoring malformed attribute: {e}");
        T::default()
    }))
}

/// Display text. Numbers and booleans show the way they print.
pub(crate) fn lenient_text<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => {
            log::warn!("ignoring non-scalar text {other}");
            String::new()
        }
    })
}

/// Booleans, also accepting the strings `"true"` and `"false"`.
pub(crate) fn lenient_flag<'de, D>(d: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => Some(b),
        Value::Null => None,
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Some(false),
        other => {
            log::warn!("ignoring non-boolean flag value {other}");
            None
        }
    })
}

/// Attributes every node kind carries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeBase {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_align",
        skip_serializing_if = "Option::is_none"
    )]
    pub align: Option<Align>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub visible_when_flag: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub visible_when: Option<bool>,
}

impl NodeBase {
    /// The gating flag and the value it must hold, if this node is gated.
    /// An empty flag name counts as no gate.
    pub fn visibility_gate(&self) -> Option<(&str, bool)> {
        self.visible_when_flag
            .as_deref()
            .filter(|f| !f.is_empty())
            .map(|f| (f, self.visible_when.unwrap_or(true)))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub padding: Option<f32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub gap: Option<f32>,
    /// Each child decodes on its own; a null or non-list value means none.
    #[serde(default, deserialize_with = "lenient")]
    pub children: Vec<UiNode>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    #[serde(
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub bold: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Show this input's current value instead of `text` once it has one.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub text_from_input_id: Option<String>,
    /// Template for the bound value; `{value}` is substituted.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub text_template: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ButtonNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub on_click: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tint: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub enabled: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub enable_when_input_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub enable_when_min_cents: Option<i64>,
}

impl ButtonNode {
    /// `on_click`, then `id`, then empty (meaning "do nothing").
    pub fn action_id(&self) -> &str {
        self.on_click
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.base.id.as_deref())
            .unwrap_or("")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpacerNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub padding: Option<f32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
}

/// Image bytes live on the envelope, see [`crate::UiLayout::decode_logo`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LogoNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MoneyInputNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Shared shape of `input_text` and `input_password`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// One element of the layout tree. Decoding never fails. Attributes decode
/// one by one and a malformed value only loses that attribute; unknown kinds
/// and elements that are not objects at all become diagnostic variants.
#[derive(Clone, Debug, PartialEq)]
pub enum UiNode {
    Column(ColumnNode),
    Text(TextNode),
    Button(ButtonNode),
    Spacer(SpacerNode),
    Scroll(ScrollNode),
    Logo(LogoNode),
    InputMoney(MoneyInputNode),
    InputText(InputNode),
    InputPassword(InputNode),
    Unknown {
        type_name: String,
        base: NodeBase,
    },
    Invalid {
        type_name: String,
        reason: String,
        base: NodeBase,
    },
}

impl UiNode {
    pub fn base(&self) -> &NodeBase {
        match self {
            UiNode::Column(n) => &n.base,
            UiNode::Text(n) => &n.base,
            UiNode::Button(n) => &n.base,
            UiNode::Spacer(n) => &n.base,
            UiNode::Scroll(n) => &n.base,
            UiNode::Logo(n) => &n.base,
            UiNode::InputMoney(n) => &n.base,
            UiNode::InputText(n) | UiNode::InputPassword(n) => &n.base,
            UiNode::Unknown { base, .. } | UiNode::Invalid { base, .. } => base,
        }
    }

    /// The wire discriminant.
    pub fn type_name(&self) -> &str {
        match self {
            UiNode::Column(_) => "column",
            UiNode::Text(_) => "text",
            UiNode::Button(_) => "button",
            UiNode::Spacer(_) => "spacer",
            UiNode::Scroll(_) => "scroll",
            UiNode::Logo(_) => "logo",
            UiNode::InputMoney(_) => "input_money",
            UiNode::InputText(_) => "input_text",
            UiNode::InputPassword(_) => "input_password",
            UiNode::Unknown { type_name, .. } | UiNode::Invalid { type_name, .. } => type_name,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.base().id.as_deref()
    }

    pub fn children(&self) -> &[UiNode] {
        match self {
            UiNode::Column(c) => &c.children,
            _ => &[],
        }
    }

    pub fn from_value(value: Value) -> UiNode {
        let Value::Object(ref obj) = value else {
            let kind = match &value {
                Value::Null => "null",
                Value::Bool(_) => "bool",
                Value::Number(_) => "number",
                Value::String(_) => "string",
                Value::Array(_) => "array",
                Value::Object(_) => "object",
            };
            log::warn!("layout element is a {kind}, not a node");
            return UiNode::Invalid {
                type_name: kind.to_string(),
                reason: "node is not an object".into(),
                base: NodeBase::default(),
            };
        };
        let type_name = obj
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        fn decode<T: serde::de::DeserializeOwned>(
            value: Value,
            wrap: impl FnOnce(T) -> UiNode,
            type_name: String,
        ) -> UiNode {
            match serde_json::from_value::<T>(value.clone()) {
                Ok(n) => wrap(n),
                Err(e) => {
                    log::warn!("node '{type_name}' has invalid attributes: {e}");
                    UiNode::Invalid {
                        type_name,
                        reason: e.to_string(),
                        base: serde_json::from_value(value).unwrap_or_default(),
                    }
                }
            }
        }

        match type_name.as_str() {
            "column" => decode(value, UiNode::Column, type_name),
            "text" => decode(value, UiNode::Text, type_name),
            "button" => decode(value, UiNode::Button, type_name),
            "spacer" => decode(value, UiNode::Spacer, type_name),
            "scroll" => decode(value, UiNode::Scroll, type_name),
            "logo" => decode(value, UiNode::Logo, type_name),
            "input_money" => decode(value, UiNode::InputMoney, type_name),
            "input_text" => decode(value, UiNode::InputText, type_name),
            "input_password" => decode(value, UiNode::InputPassword, type_name),
            _ => UiNode::Unknown {
                base: serde_json::from_value(value).unwrap_or_default(),
                type_name,
            },
        }
    }

    pub fn to_value(&self) -> Value {
        let body = match self {
            UiNode::Column(n) => serde_json::to_value(n),
            UiNode::Text(n) => serde_json::to_value(n),
            UiNode::Button(n) => serde_json::to_value(n),
            UiNode::Spacer(n) => serde_json::to_value(n),
            UiNode::Scroll(n) => serde_json::to_value(n),
            UiNode::Logo(n) => serde_json::to_value(n),
            UiNode::InputMoney(n) => serde_json::to_value(n),
            UiNode::InputText(n) | UiNode::InputPassword(n) => serde_json::to_value(n),
            UiNode::Unknown { base, .. } | UiNode::Invalid { base, .. } => {
                serde_json::to_value(base)
            }
        };
        let mut body = body.unwrap_or_else(|_| Value::Object(Default::default()));
        if let Value::Object(map) = &mut body {
            map.insert("type".into(), Value::String(self.type_name().to_string()));
        }
        body
    }
}

impl<'de> Deserialize<'de> for UiNode {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(UiNode::from_value(Value::deserialize(d)?))
    }
}

impl Serialize for UiNode {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_each_known_kind() {
        let kinds = [
            ("column", "column"),
            ("text", "text"),
            ("button", "button"),
            ("spacer", "spacer"),
            ("scroll", "scroll"),
            ("logo", "logo"),
            ("input_money", "input_money"),
            ("input_text", "input_text"),
            ("input_password", "input_password"),
        ];
        for (wire, expected) in kinds {
            let node = UiNode::from_value(json!({ "type": wire }));
            assert_eq!(node.type_name(), expected);
            assert!(!matches!(node, UiNode::Invalid { .. } | UiNode::Unknown { .. }));
        }
    }

    #[test]
    fn unknown_kind_keeps_name_and_base() {
        let node = UiNode::from_value(json!({
            "type": "foo", "id": "x", "visible_when_flag": "f"
        }));
        match node {
            UiNode::Unknown { type_name, base } => {
                assert_eq!(type_name, "foo");
                assert_eq!(base.id.as_deref(), Some("x"));
                assert_eq!(base.visibility_gate(), Some(("f", true)));
            }
            other => panic!("expected unknown, got {other:?}"),
        }
    }

    #[test]
    fn non_objects_become_invalid() {
        match UiNode::from_value(json!("nope")) {
            UiNode::Invalid { type_name, .. } => assert_eq!(type_name, "string"),
            other => panic!("expected invalid, got {other:?}"),
        }
        assert_eq!(UiNode::from_value(json!([1])).type_name(), "array");
    }

    #[test]
    fn mistyped_attribute_only_loses_itself() {
        let node = UiNode::from_value(json!({
            "type": "column", "id": "main", "padding": "24", "gap": 8, "background": 7,
            "children": [
                { "type": "text", "id": "t", "text": "Hello" },
                { "type": "spacer", "height": "tall" },
                "stray"
            ]
        }));
        let UiNode::Column(col) = node else {
            panic!("column expected, got {node:?}")
        };
        assert_eq!(col.base.id.as_deref(), Some("main"));
        assert_eq!((col.padding, col.gap, col.background), (None, Some(8.0), None));
        assert_eq!(col.children.len(), 3);
        assert_eq!(col.children[0].id(), Some("t"));
        assert!(matches!(&col.children[1], UiNode::Spacer(s) if s.height.is_none()));
        assert!(matches!(col.children[2], UiNode::Invalid { .. }));
    }

    #[test]
    fn null_text_and_children_read_as_empty() {
        let UiNode::Text(t) = UiNode::from_value(json!({ "type": "text", "text": null })) else {
            panic!("text expected")
        };
        assert_eq!(t.text, "");

        let UiNode::Column(c) = UiNode::from_value(json!({ "type": "column", "children": null }))
        else {
            panic!("column expected")
        };
        assert!(c.children.is_empty());

        let UiNode::Column(c) = UiNode::from_value(json!({ "type": "column", "children": "x" }))
        else {
            panic!("column expected")
        };
        assert!(c.children.is_empty());
    }

    #[test]
    fn scalar_text_prints_as_is() {
        let UiNode::Button(b) = UiNode::from_value(json!({ "type": "button", "text": 42 })) else {
            panic!("button expected")
        };
        assert_eq!(b.text, "42");
    }

    #[test]
    fn gate_survives_sloppy_attributes() {
        let node = UiNode::from_value(json!({
            "type": "text", "id": "t", "size": "big",
            "visible_when_flag": "login_error", "visible_when": "false"
        }));
        let UiNode::Text(t) = &node else {
            panic!("text expected, got {node:?}")
        };
        assert_eq!(t.size, None);
        assert_eq!(node.base().visibility_gate(), Some(("login_error", false)));

        let b: ButtonNode = serde_json::from_value(json!({ "enabled": "false" })).unwrap();
        assert_eq!(b.enabled, Some(false));
    }

    #[test]
    fn unknown_align_is_dropped() {
        let node = UiNode::from_value(json!({ "type": "text", "text": "a", "align": "left" }));
        let UiNode::Text(t) = node else {
            panic!("text expected")
        };
        assert_eq!(t.base.align, None);
        assert_eq!(t.text, "a");
    }

    #[test]
    fn visibility_gate_defaults_to_true() {
        let gated: NodeBase =
            serde_json::from_value(json!({ "visible_when_flag": "screen_login" })).unwrap();
        assert_eq!(gated.visibility_gate(), Some(("screen_login", true)));
        let negated: NodeBase =
            serde_json::from_value(json!({ "visible_when_flag": "e", "visible_when": false }))
                .unwrap();
        assert_eq!(negated.visibility_gate(), Some(("e", false)));
        let empty: NodeBase = serde_json::from_value(json!({ "visible_when_flag": "" })).unwrap();
        assert_eq!(empty.visibility_gate(), None);
    }

    #[test]
    fn button_action_falls_back_to_id() {
        let b: ButtonNode = serde_json::from_value(json!({ "id": "btn_ok" })).unwrap();
        assert_eq!(b.action_id(), "btn_ok");
        let b: ButtonNode =
            serde_json::from_value(json!({ "id": "btn_ok", "on_click": "sale.commit" })).unwrap();
        assert_eq!(b.action_id(), "sale.commit");
        assert_eq!(ButtonNode::default().action_id(), "");
    }

    #[test]
    fn serializes_with_type_tag() {
        let node = UiNode::from_value(json!({ "type": "spacer", "height": 8.0 }));
        let v = node.to_value();
        assert_eq!(v["type"], "spacer");
        assert_eq!(v["height"], 8.0);
        assert_eq!(UiNode::from_value(v), node);
    }
}

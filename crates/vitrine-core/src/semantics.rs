/// High‑level semantic role of a view, similar to ARIA roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Text,
    Button,
    TextField,
    Image,
    Container,
    Alert,
}

/// Semantics attached to a `View`, used to build the accessibility tree and
/// by tests to find views without depending on layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Semantics {
    pub role: Role,
    /// Human‑readable label. For buttons this is the announced name.
    pub label: Option<String>,
    /// Disabled nodes remain in the tree but are marked not enabled.
    pub enabled: bool,
}

impl Semantics {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            label: None,
            enabled: true,
        }
    }
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

use vitrine_layout::{NodeBase, UiNode};

use crate::state::Flags;

/// Whether `node` should render under `flags`. A node without a gate is
/// always shown; a gated node shows when the flag (absent reads `false`)
/// equals the expected value.
pub fn is_visible(node: &UiNode, flags: &Flags) -> bool {
    gate_passes(node.base(), flags)
}

pub fn gate_passes(base: &NodeBase, flags: &Flags) -> bool {
    match base.visibility_gate() {
        None => true,
        Some((flag, expected)) => flags.get(flag).copied().unwrap_or(false) == expected,
    }
}

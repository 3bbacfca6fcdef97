use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use vitrine_core::{Dispose, Signal, signal};

pub const SCREEN_LOGIN: &str = "screen_login";
pub const SCREEN_START: &str = "screen_start";
pub const LOGIN_ERROR: &str = "login_error";

/// Second key password edits are copied into when mirroring is enabled.
pub const PASSWORD_MIRROR_KEY: &str = "__pwd_val";
pub const DEFAULT_CREDENTIAL_FIELD: &str = "user_pass";

pub type Inputs = HashMap<String, String>;
pub type Flags = HashMap<String, bool>;

/// Local, ephemeral interaction state: field texts and boolean UI flags.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
    pub inputs: Inputs,
    pub flags: Flags,
}

impl InteractionState {
    /// Empty inputs and the starting screen: login shown, no error.
    pub fn seeded() -> Self {
        let flags = [(SCREEN_LOGIN, true), (SCREEN_START, false), (LOGIN_ERROR, false)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Self {
            inputs: HashMap::new(),
            flags,
        }
    }

    pub fn input(&self, id: &str) -> Option<&str> {
        self.inputs.get(id).map(String::as_str)
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }
}

/// Cloneable handle over the interaction state. Every write bumps a
/// revision signal; hosts watch it to schedule a re-render.
#[derive(Clone)]
pub struct StateStore {
    inner: Rc<RefCell<InteractionState>>,
    revision: Signal<u64>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    pub fn new() -> Self {
        Self::from_state(InteractionState::seeded())
    }

    pub fn from_state(state: InteractionState) -> Self {
        Self {
            inner: Rc::new(RefCell::new(state)),
            revision: signal(0),
        }
    }

    /// Entries are added or overwritten, never removed.
    pub fn set_input(&self, id: &str, value: impl Into<String>) {
        self.inner
            .borrow_mut()
            .inputs
            .insert(id.to_string(), value.into());
        self.bump();
    }

    pub fn set_flag(&self, name: &str, value: bool) {
        self.inner.borrow_mut().flags.insert(name.to_string(), value);
        self.bump();
    }

    pub fn input(&self, id: &str) -> Option<String> {
        self.inner.borrow().inputs.get(id).cloned()
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.inner.borrow().flag(name)
    }

    /// Copy of the state for one render pass.
    pub fn snapshot(&self) -> InteractionState {
        self.inner.borrow().clone()
    }

    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    /// Run `f` with the new revision after every write.
    pub fn on_change(&self, f: impl Fn(u64) + 'static) -> Dispose {
        self.revision.watch(move |rev| f(*rev))
    }

    fn bump(&self) {
        self.revision.update(|r| *r = r.wrapping_add(1));
    }
}

/// Edit buffers for fields that stay outside [`InteractionState`], such as
/// money entry. Keyed by field id; a draft shadows the node's seed value
/// until the host drops the renderer.
#[derive(Clone)]
pub struct DraftStore {
    values: Rc<RefCell<HashMap<String, String>>>,
    revision: Signal<u64>,
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftStore {
    pub fn new() -> Self {
        Self {
            values: Rc::new(RefCell::new(HashMap::new())),
            revision: signal(0),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    pub fn set(&self, key: &str, value: impl Into<String>) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.into());
        self.revision.update(|r| *r = r.wrapping_add(1));
    }

    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    pub fn on_change(&self, f: impl Fn(u64) + 'static) -> Dispose {
        self.revision.watch(move |rev| f(*rev))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn starts_on_login_screen() {
        let store = StateStore::new();
        assert_eq!(store.flag(SCREEN_LOGIN), Some(true));
        assert_eq!(store.flag(SCREEN_START), Some(false));
        assert_eq!(store.flag(LOGIN_ERROR), Some(false));
        assert!(store.snapshot().inputs.is_empty());
    }

    #[test]
    fn absent_keys_read_as_none() {
        let store = StateStore::new();
        assert_eq!(store.input("nope"), None);
        assert_eq!(store.flag("nope"), None);
    }

    #[test]
    fn writes_overwrite_and_bump_revision() {
        let store = StateStore::new();
        let seen = Rc::new(Cell::new(0));
        let _watch = store.on_change({
            let seen = seen.clone();
            move |rev| seen.set(rev)
        });

        store.set_input("name", "Al");
        store.set_input("name", "Alice");
        store.set_flag("busy", true);

        assert_eq!(store.input("name").as_deref(), Some("Alice"));
        assert_eq!(store.flag("busy"), Some(true));
        assert_eq!(store.revision(), 3);
        assert_eq!(seen.get(), 3);
    }

    #[test]
    fn clones_share_state() {
        let a = StateStore::new();
        let b = a.clone();
        b.set_input("x", "1");
        assert_eq!(a.input("x").as_deref(), Some("1"));
    }

    #[test]
    fn disposed_watch_stops_firing() {
        let store = StateStore::new();
        let hits = Rc::new(Cell::new(0));
        let watch = store.on_change({
            let hits = hits.clone();
            move |_| hits.set(hits.get() + 1)
        });
        store.set_flag("a", true);
        watch.run();
        store.set_flag("a", false);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn drafts_are_separate_from_inputs() {
        let store = StateStore::new();
        let drafts = DraftStore::new();
        let seen = Rc::new(Cell::new(0));
        let _watch = drafts.on_change({
            let seen = seen.clone();
            move |rev| seen.set(rev)
        });

        drafts.set("amount", "7.25");
        assert_eq!(drafts.get("amount").as_deref(), Some("7.25"));
        assert_eq!(store.input("amount"), None);
        assert_eq!(store.revision(), 0);
        assert_eq!(seen.get(), 1);
    }
}

use std::rc::Rc;

use serde_json::Value;

use crate::{LayoutError, UiLayout};

/// Holds the last layout that decoded cleanly. A replacement that fails to
/// decode is rejected and the previous layout stays current.
#[derive(Debug, Default)]
pub struct LayoutStore {
    current: Option<Rc<UiLayout>>,
    revision: u64,
    rejected: u64,
}

impl LayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and promote `json`; on failure keep the last good layout.
    pub fn apply_json(&mut self, json: &str) -> Result<Rc<UiLayout>, LayoutError> {
        let decoded = UiLayout::from_json(json);
        self.promote(decoded)
    }

    /// Same as [`LayoutStore::apply_json`] for an already parsed document,
    /// such as one pulled out of a broker frame.
    pub fn apply_value(&mut self, value: Value) -> Result<Rc<UiLayout>, LayoutError> {
        let decoded = UiLayout::from_value(value);
        self.promote(decoded)
    }

    fn promote(
        &mut self,
        decoded: Result<UiLayout, LayoutError>,
    ) -> Result<Rc<UiLayout>, LayoutError> {
        match decoded {
            Ok(layout) => Ok(self.replace(layout)),
            Err(e) => {
                self.rejected += 1;
                log::warn!(
                    "rejected layout update ({e}); keeping revision {}",
                    self.revision
                );
                Err(e)
            }
        }
    }

    /// Replace wholesale. There is no diffing against the previous tree.
    pub fn replace(&mut self, layout: UiLayout) -> Rc<UiLayout> {
        let layout = Rc::new(layout);
        self.current = Some(layout.clone());
        self.revision += 1;
        log::debug!("layout revision {}", self.revision);
        layout
    }

    pub fn current(&self) -> Option<Rc<UiLayout>> {
        self.current.clone()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = r#"{ "root": { "type": "text", "text": "one" } }"#;
    const OTHER: &str = r#"{ "root": { "type": "text", "text": "two" } }"#;

    fn root_text(store: &LayoutStore) -> String {
        match &store.current().unwrap().root {
            crate::UiNode::Text(t) => t.text.clone(),
            other => panic!("unexpected root {other:?}"),
        }
    }

    #[test]
    fn starts_empty() {
        let store = LayoutStore::new();
        assert!(store.current().is_none());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn replaces_wholesale() {
        let mut store = LayoutStore::new();
        store.apply_json(GOOD).unwrap();
        store.apply_json(OTHER).unwrap();
        assert_eq!(root_text(&store), "two");
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn keeps_last_good_on_bad_update() {
        let mut store = LayoutStore::new();
        store.apply_json(GOOD).unwrap();
        assert!(store.apply_json("{ broken").is_err());
        assert!(store.apply_json(r#"{ "nope": 1 }"#).is_err());
        assert_eq!(root_text(&store), "one");
        assert_eq!(store.revision(), 1);
        assert_eq!(store.rejected(), 2);
    }

    #[test]
    fn applies_parsed_documents() {
        let mut store = LayoutStore::new();
        store
            .apply_value(serde_json::json!({ "root": { "type": "text", "text": "one" } }))
            .unwrap();
        assert!(store.apply_value(serde_json::json!([1, 2])).is_err());
        assert_eq!(root_text(&store), "one");
        assert_eq!(store.rejected(), 1);
    }
}

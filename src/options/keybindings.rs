use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::controls::GestureKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
/// Modifier keys that temporarily force a gesture while held.
pub struct KeybindingOptions {
    /// Maps gesture → key string (e.g. `Rotate` → `"KeyA"`).
    pub bindings: HashMap<GestureKind, String>,
    /// Reverse lookup cache (key string → gesture). Rebuilt on load.
    #[serde(skip)]
    key_to_gesture: HashMap<String, GestureKind>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (GestureKind::Rotate, "KeyA".into()),
            (GestureKind::Zoom, "KeyS".into()),
            (GestureKind::Pan, "KeyD".into()),
        ]);

        let mut opts = Self {
            bindings,
            key_to_gesture: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key string → gesture).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_gesture.clear();
        for (gesture, key) in &self.bindings {
            let _ = self.key_to_gesture.insert(key.clone(), *gesture);
        }
    }

    /// Bind `gesture` to `key`, replacing its previous key.
    pub fn bind(&mut self, gesture: GestureKind, key: impl Into<String>) {
        let _ = self.bindings.insert(gesture, key.into());
        self.rebuild_reverse_map();
    }

    /// Look up the gesture for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<GestureKind> {
        self.key_to_gesture.get(key).copied().or_else(|| {
            // reverse map is empty straight after deserialization
            self.bindings
                .iter()
                .find(|(_, bound)| bound.as_str() == key)
                .map(|(gesture, _)| *gesture)
        })
    }
}

impl PartialEq for KeybindingOptions {
    fn eq(&self, other: &Self) -> bool {
        self.bindings == other.bindings
    }
}

impl Eq for KeybindingOptions {}

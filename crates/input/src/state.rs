use crate::key::InputEvent;
use std::collections::{BTreeMap, VecDeque};

/// Pressed/released state per normalized key.
///
/// Uses BTreeMap so debug dumps list keys in a stable order.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: BTreeMap<String, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. Returns `true` when a key-down is a rising edge,
    /// i.e. the key was not already held (auto-repeat returns `false`).
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::KeyDown(key) => {
                let was_pressed = self.pressed.insert(key.clone(), true).unwrap_or(false);
                !was_pressed
            }
            InputEvent::KeyUp(key) => {
                self.pressed.insert(key.clone(), false);
                false
            }
        }
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.get(key).copied().unwrap_or(false)
    }

    /// True if any of `keys` is held.
    pub fn any_pressed<S: AsRef<str>>(&self, keys: &[S]) -> bool {
        keys.iter().any(|k| self.is_pressed(k.as_ref()))
    }

    /// Release every key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        tracing::debug!(held = self.held().count(), "releasing all keys");
        self.pressed.clear();
    }

    /// Keys currently held, in sorted order.
    pub fn held(&self) -> impl Iterator<Item = &str> {
        self.pressed
            .iter()
            .filter(|(_, down)| **down)
            .map(|(k, _)| k.as_str())
    }
}

/// Single-consumer buffer of key events.
///
/// Event callbacks push; the frame tick drains everything at once before
/// integrating, which keeps jump triggering serialized with the update.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Take all buffered events in delivery order.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_is_not_pressed() {
        let state = InputState::new();
        assert!(!state.is_pressed("w"));
    }

    #[test]
    fn press_and_release() {
        let mut state = InputState::new();
        assert!(state.apply(&InputEvent::down("w")));
        assert!(state.is_pressed("w"));
        assert!(!state.apply(&InputEvent::up("w")));
        assert!(!state.is_pressed("w"));
    }

    #[test]
    fn repeated_key_down_is_not_a_rising_edge() {
        let mut state = InputState::new();
        assert!(state.apply(&InputEvent::down("Space")));
        assert!(!state.apply(&InputEvent::down("Space")));
        state.apply(&InputEvent::up("Space"));
        assert!(state.apply(&InputEvent::down("Space")));
    }

    #[test]
    fn any_pressed_checks_alternatives() {
        let mut state = InputState::new();
        state.apply(&InputEvent::down("ArrowUp"));
        assert!(state.any_pressed(&["w", "ArrowUp"]));
        assert!(!state.any_pressed(&["s", "ArrowDown"]));
    }

    #[test]
    fn held_lists_only_pressed_keys() {
        let mut state = InputState::new();
        state.apply(&InputEvent::down("w"));
        state.apply(&InputEvent::down("d"));
        state.apply(&InputEvent::up("w"));
        assert_eq!(state.held().collect::<Vec<_>>(), vec!["d"]);
        state.release_all();
        assert_eq!(state.held().count(), 0);
    }

    #[test]
    fn queue_drains_in_order() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::down("w"));
        queue.push(InputEvent::up("w"));
        queue.push(InputEvent::down("Space"));
        assert_eq!(queue.len(), 3);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(
            drained,
            vec![
                InputEvent::down("w"),
                InputEvent::up("w"),
                InputEvent::down("Space"),
            ]
        );
        assert!(queue.is_empty());
    }
}

use crate::key::SPACE;
use crate::state::InputState;
use serde::{Deserialize, Serialize};

/// Directional keys held this frame. Not mutually exclusive: opposite keys
/// may both be set and cancel out when applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }
}

/// Maps normalized key identifiers to movement and jump.
///
/// Loaded as the `keys` section of the config; omitted actions keep their
/// default keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: Vec<String>,
    pub backward: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub jump: Vec<String>,
}

impl Default for KeyBindings {
    /// WASD and arrow keys; space to jump.
    fn default() -> Self {
        let keys = |ks: &[&str]| ks.iter().map(|k| k.to_string()).collect();
        Self {
            forward: keys(&["w", "ArrowUp"]),
            backward: keys(&["s", "ArrowDown"]),
            left: keys(&["a", "ArrowLeft"]),
            right: keys(&["d", "ArrowRight"]),
            jump: keys(&[SPACE]),
        }
    }
}

impl KeyBindings {
    /// Read the directional keys from the current input state.
    pub fn intent(&self, state: &InputState) -> MoveIntent {
        MoveIntent {
            forward: state.any_pressed(&self.forward),
            backward: state.any_pressed(&self.backward),
            left: state.any_pressed(&self.left),
            right: state.any_pressed(&self.right),
        }
    }

    pub fn is_jump(&self, key: &str) -> bool {
        self.jump.iter().any(|k| k == key)
    }

    /// Key used when a script taps jump. Falls back to [`SPACE`] when the
    /// jump action is unbound.
    pub fn jump_key(&self) -> &str {
        self.jump.first().map(String::as_str).unwrap_or(SPACE)
    }

    /// Every action with its bound keys, in a fixed order.
    pub fn actions(&self) -> [(&'static str, &[String]); 5] {
        [
            ("forward", &self.forward),
            ("backward", &self.backward),
            ("left", &self.left),
            ("right", &self.right),
            ("jump", &self.jump),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::InputEvent;

    #[test]
    fn idle_when_nothing_held() {
        let bindings = KeyBindings::default();
        assert!(bindings.intent(&InputState::new()).is_idle());
    }

    #[test]
    fn wasd_and_arrows_are_equivalent() {
        let bindings = KeyBindings::default();
        let mut state = InputState::new();
        state.apply(&InputEvent::down("W"));
        state.apply(&InputEvent::down("ArrowRight"));
        let intent = bindings.intent(&state);
        assert!(intent.forward);
        assert!(intent.right);
        assert!(!intent.backward);
        assert!(!intent.left);
    }

    #[test]
    fn opposite_keys_both_register() {
        let bindings = KeyBindings::default();
        let mut state = InputState::new();
        state.apply(&InputEvent::down("a"));
        state.apply(&InputEvent::down("ArrowRight"));
        let intent = bindings.intent(&state);
        assert!(intent.left && intent.right);
    }

    #[test]
    fn space_is_jump() {
        let bindings = KeyBindings::default();
        assert!(bindings.is_jump(SPACE));
        assert!(!bindings.is_jump("w"));
        assert_eq!(bindings.jump_key(), SPACE);
    }

    #[test]
    fn unbound_jump_key_falls_back_to_space() {
        let bindings = KeyBindings {
            jump: Vec::new(),
            ..KeyBindings::default()
        };
        assert_eq!(bindings.jump_key(), SPACE);
        assert!(!bindings.is_jump(SPACE));
    }

    #[test]
    fn actions_cover_every_binding() {
        let bindings = KeyBindings::default();
        let names: Vec<_> = bindings.actions().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["forward", "backward", "left", "right", "jump"]);
        assert_eq!(bindings.actions()[4].1, [SPACE.to_string()]);
    }
}

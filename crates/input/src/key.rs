use serde::{Deserialize, Serialize};

/// Identifier used for the space bar after normalization.
pub const SPACE: &str = "Space";

/// Normalize a raw key name into the identifier stored in [`InputState`].
///
/// Single characters are lowercased so `W` and `w` are the same key; a
/// literal space becomes [`SPACE`]. Named keys (`ArrowUp`, `Escape`, ...)
/// pass through unchanged.
///
/// [`InputState`]: crate::InputState
pub fn normalize_key(raw: &str) -> String {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(' '), None) => SPACE.to_string(),
        (Some(c), None) => c.to_lowercase().collect(),
        _ => raw.to_string(),
    }
}

/// A key transition delivered by the host between frame ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
}

impl InputEvent {
    /// Key-down event with the key name normalized.
    pub fn down(raw: &str) -> Self {
        Self::KeyDown(normalize_key(raw))
    }

    /// Key-up event with the key name normalized.
    pub fn up(raw: &str) -> Self {
        Self::KeyUp(normalize_key(raw))
    }

    pub fn key(&self) -> &str {
        match self {
            Self::KeyDown(k) | Self::KeyUp(k) => k,
        }
    }

    pub fn is_down(&self) -> bool {
        matches!(self, Self::KeyDown(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_characters_are_lowercased() {
        assert_eq!(normalize_key("W"), "w");
        assert_eq!(normalize_key("d"), "d");
    }

    #[test]
    fn named_keys_pass_through() {
        assert_eq!(normalize_key("ArrowUp"), "ArrowUp");
        assert_eq!(normalize_key("Space"), "Space");
    }

    #[test]
    fn literal_space_becomes_named() {
        assert_eq!(normalize_key(" "), SPACE);
    }

    #[test]
    fn event_constructors_normalize() {
        let e = InputEvent::down("A");
        assert_eq!(e, InputEvent::KeyDown("a".into()));
        assert!(e.is_down());
        assert_eq!(InputEvent::up("ArrowLeft").key(), "ArrowLeft");
    }
}

//! Input: normalized key events, pressed-key state and movement bindings.
//!
//! # Invariants
//! - A key absent from [`InputState`] is not pressed.
//! - Events reach the state only through [`InputQueue::drain`], once per frame
//!   tick, so the consumer sees them in delivery order.
//!
//! Nothing here knows about windowing; the desktop app converts its native
//! key events into [`InputEvent`]s.

pub mod action;
pub mod key;
pub mod state;

pub use action::{KeyBindings, MoveIntent};
pub use key::{InputEvent, SPACE, normalize_key};
pub use state::{InputQueue, InputState};

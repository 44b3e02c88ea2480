//! Platform abstraction layer
//!
//! Handles browser specifics for:
//! - Frame ticks (`requestAnimationFrame`)
//! - Wall-clock timers (`setTimeout`)
//! - Mapping key codes to game input

#[cfg(target_arch = "wasm32")]
pub mod web;

/// What a raw input event means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Jump,
}

/// Map a `KeyboardEvent.code` to an action
pub fn key_action(code: &str) -> Option<InputAction> {
    match code {
        "Space" | "ArrowUp" => Some(InputAction::Jump),
        _ => None,
    }
}

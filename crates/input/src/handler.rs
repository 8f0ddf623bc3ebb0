//! Held-key tracking for terminal environments.
//!
//! Left and right are tracked independently, so holding both yields no net
//! movement. Jump is reported once per press and never held.
//!
//! Many terminals only report presses (plus auto-repeat presses while a key
//! is held). Without release events a key is considered released once no
//! press or repeat has refreshed it for `key_release_timeout`. When the
//! terminal does report releases the timeout can be switched off.

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use crate::core::HeldKeys;
use crate::map::action_for_code;
use crate::types::GameAction;

// Long enough to bridge the typical initial auto-repeat delay (~500ms) so a
// held key does not stutter before the terminal starts repeating it.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 550;

/// Tracks which movement keys are held.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Last press/repeat of a held left key.
    left: Option<Instant>,
    /// Last press/repeat of a held right key.
    right: Option<Instant>,
    key_release_timeout: Option<Duration>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            left: None,
            right: None,
            key_release_timeout: Some(Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS)),
        }
    }

    pub fn with_key_release_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.key_release_timeout = timeout;
        self
    }

    pub fn key_release_timeout(&self) -> Option<Duration> {
        self.key_release_timeout
    }

    /// Call when the terminal is known to report key releases.
    pub fn set_release_events_supported(&mut self, supported: bool) {
        self.key_release_timeout = if supported {
            None
        } else {
            Some(Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS))
        };
    }

    /// Handle a key press. Returns the action when it starts something new:
    /// a movement key that was not already held, or any jump press.
    pub fn handle_key_press(&mut self, code: KeyCode, now: Instant) -> Option<GameAction> {
        match action_for_code(code)? {
            GameAction::MoveLeft => {
                Self::press(&mut self.left, now).then_some(GameAction::MoveLeft)
            }
            GameAction::MoveRight => {
                Self::press(&mut self.right, now).then_some(GameAction::MoveRight)
            }
            GameAction::Jump => Some(GameAction::Jump),
        }
    }

    /// Handle an auto-repeat event: keeps a held movement key alive. Never jumps.
    pub fn handle_key_repeat(&mut self, code: KeyCode, now: Instant) {
        match action_for_code(code) {
            Some(GameAction::MoveLeft) => {
                self.left = Some(now);
            }
            Some(GameAction::MoveRight) => {
                self.right = Some(now);
            }
            _ => {}
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match action_for_code(code) {
            Some(GameAction::MoveLeft) => self.left = None,
            Some(GameAction::MoveRight) => self.right = None,
            _ => {}
        }
    }

    /// Held keys at `now`, after expiring stale presses.
    pub fn update(&mut self, now: Instant) -> HeldKeys {
        if let Some(timeout) = self.key_release_timeout {
            for slot in [&mut self.left, &mut self.right] {
                if let Some(at) = *slot {
                    if now.saturating_duration_since(at) > timeout {
                        *slot = None;
                    }
                }
            }
        }
        self.held()
    }

    /// Held keys without expiring anything.
    pub fn held(&self) -> HeldKeys {
        HeldKeys {
            left: self.left.is_some(),
            right: self.right.is_some(),
        }
    }

    pub fn reset(&mut self) {
        self.left = None;
        self.right = None;
    }

    /// Record a press; true if the key was not already held.
    fn press(slot: &mut Option<Instant>, now: Instant) -> bool {
        slot.replace(now).is_none()
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_press_and_release() {
        let t0 = Instant::now();
        let mut ih = InputHandler::new();

        assert_eq!(ih.handle_key_press(KeyCode::Left, t0), Some(GameAction::MoveLeft));
        // Already held: no new action.
        assert_eq!(ih.handle_key_press(KeyCode::Char('a'), t0), None);
        assert_eq!(ih.update(t0), HeldKeys { left: true, right: false });

        ih.handle_key_release(KeyCode::Left);
        assert_eq!(ih.update(t0), HeldKeys::default());
    }

    #[test]
    fn test_both_directions_held_together() {
        let t0 = Instant::now();
        let mut ih = InputHandler::new();
        ih.handle_key_press(KeyCode::Left, t0);
        ih.handle_key_press(KeyCode::Right, t0);
        assert_eq!(ih.update(t0), HeldKeys { left: true, right: true });

        ih.handle_key_release(KeyCode::Right);
        assert_eq!(ih.update(t0), HeldKeys { left: true, right: false });
    }

    #[test]
    fn test_jump_is_edge_triggered() {
        let t0 = Instant::now();
        let mut ih = InputHandler::new();
        assert_eq!(ih.handle_key_press(KeyCode::Char(' '), t0), Some(GameAction::Jump));
        assert_eq!(ih.handle_key_press(KeyCode::Char(' '), t0), Some(GameAction::Jump));
        // Jump never shows up as a held key.
        assert_eq!(ih.update(t0), HeldKeys::default());
    }

    #[test]
    fn test_auto_release_after_timeout() {
        let t0 = Instant::now();
        let mut ih = InputHandler::new().with_key_release_timeout(Some(ms(50)));

        ih.handle_key_press(KeyCode::Right, t0);
        assert!(ih.update(t0 + ms(50)).right);
        assert!(!ih.update(t0 + ms(51)).right);
    }

    #[test]
    fn test_repeat_keeps_key_alive() {
        let t0 = Instant::now();
        let mut ih = InputHandler::new().with_key_release_timeout(Some(ms(50)));

        ih.handle_key_press(KeyCode::Right, t0);
        ih.handle_key_repeat(KeyCode::Right, t0 + ms(40));
        assert!(ih.update(t0 + ms(80)).right);
        assert!(!ih.update(t0 + ms(91)).right);
    }

    #[test]
    fn test_non_movement_key_does_not_extend_timeout() {
        let t0 = Instant::now();
        let mut ih = InputHandler::new().with_key_release_timeout(Some(ms(50)));

        ih.handle_key_press(KeyCode::Left, t0);
        assert_eq!(ih.handle_key_press(KeyCode::Up, t0 + ms(45)), Some(GameAction::Jump));
        assert!(!ih.update(t0 + ms(51)).left);
    }

    #[test]
    fn test_release_events_disable_timeout() {
        let t0 = Instant::now();
        let mut ih = InputHandler::new();
        ih.set_release_events_supported(true);
        assert_eq!(ih.key_release_timeout(), None);

        ih.handle_key_press(KeyCode::Left, t0);
        assert!(ih.update(t0 + Duration::from_secs(10)).left);

        ih.set_release_events_supported(false);
        assert!(ih.key_release_timeout().is_some());
    }

    #[test]
    fn test_reset_clears_held_state() {
        let t0 = Instant::now();
        let mut ih = InputHandler::new();
        ih.handle_key_press(KeyCode::Left, t0);
        ih.handle_key_press(KeyCode::Right, t0);
        ih.reset();
        assert_eq!(ih.held(), HeldKeys::default());
    }
}

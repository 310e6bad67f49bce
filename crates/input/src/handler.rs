//! DAS/ARR input handler for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout.
//! One move direction auto-repeats at a time; the drop key is a held state
//! that the game reads as a gravity multiplier instead of discrete actions.

use crossterm::event::KeyCode;

use arrayvec::ArrayVec;

use crate::map::{is_drop_key, move_direction};
use crate::types::{
    GameAction, MoveDirection, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_GRACE_MS,
    SOFT_DROP_MULTIPLIER,
};

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    held: Option<MoveDirection>,
    drop_held: bool,
    last_key_time: std::time::Instant,
    das_timer: u32,
    arr_accumulator: u32,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            held: None,
            drop_held: false,
            last_key_time: std::time::Instant::now(),
            das_timer: 0,
            arr_accumulator: 0,
            das_delay,
            arr_rate: arr_rate.max(1),
            key_release_timeout_ms: SOFT_DROP_GRACE_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Direction currently auto-repeating
    pub fn held_direction(&self) -> Option<MoveDirection> {
        self.held
    }

    /// Gravity multiplier for the game, 1.0 unless the drop key is held
    pub fn drop_multiplier(&self) -> f32 {
        if self.drop_held {
            SOFT_DROP_MULTIPLIER as f32
        } else {
            1.0
        }
    }

    /// Returns the immediate move for a fresh press, `None` for repeats and
    /// keys this handler does not track.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        if is_drop_key(code) {
            self.last_key_time = std::time::Instant::now();
            self.drop_held = true;
            return None;
        }
        let direction = move_direction(code)?;
        self.last_key_time = std::time::Instant::now();
        if self.held == Some(direction) {
            return None;
        }
        self.held = Some(direction);
        self.das_timer = 0;
        self.arr_accumulator = 0;
        Some(GameAction::Move(direction))
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        if is_drop_key(code) {
            self.drop_held = false;
            return;
        }
        if let Some(direction) = move_direction(code) {
            if self.held == Some(direction) {
                self.release_move();
            }
        }
    }

    fn release_move(&mut self) {
        self.held = None;
        self.das_timer = 0;
        self.arr_accumulator = 0;
    }

    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::<GameAction, 32>::new();

        // Auto-release when terminal does not emit release events.
        let time_since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if time_since_last_key > self.key_release_timeout_ms {
            if self.held.is_some() {
                self.release_move();
            }
            self.drop_held = false;
        }

        let Some(direction) = self.held else {
            return actions;
        };

        let prev_das = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer >= self.das_delay {
            let excess = if prev_das < self.das_delay {
                self.das_timer - self.das_delay
            } else {
                elapsed_ms
            };
            self.arr_accumulator += excess;

            while self.arr_accumulator >= self.arr_rate {
                let _ = actions.try_push(GameAction::Move(direction));
                self.arr_accumulator -= self.arr_rate;
            }
        }

        actions
    }

    pub fn reset(&mut self) {
        self.release_move();
        self.drop_held = false;
        self.last_key_time = std::time::Instant::now();
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

    const LEFT: GameAction = GameAction::Move(MoveDirection::Left);

    #[test]
    fn test_das_arr_repeats_after_delay() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(LEFT));

        // Before DAS expires: no repeats.
        assert!(ih.update(99).is_empty());

        // Exactly at DAS: still no repeats (needs excess over DAS to accumulate ARR).
        assert!(ih.update(1).is_empty());

        assert_eq!(ih.update(25).as_slice(), &[LEFT]);
        assert_eq!(ih.update(50).as_slice(), &[LEFT, LEFT]);
    }

    #[test]
    fn test_row_axis_keys_repeat_too() {
        let mut ih = InputHandler::with_config(0, 10).with_key_release_timeout_ms(10_000);
        let forward = GameAction::Move(MoveDirection::Forward);
        assert_eq!(ih.handle_key_press(KeyCode::Down), Some(forward));
        assert_eq!(ih.update(20).as_slice(), &[forward, forward]);
    }

    #[test]
    fn test_new_direction_replaces_held_one() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Left);
        assert_eq!(
            ih.handle_key_press(KeyCode::Char('w')),
            Some(GameAction::Move(MoveDirection::Backward))
        );
        assert_eq!(ih.held_direction(), Some(MoveDirection::Backward));

        // releasing the old key does not stop the new one
        ih.handle_key_release(KeyCode::Left);
        assert_eq!(ih.held_direction(), Some(MoveDirection::Backward));
    }

    #[test]
    fn test_repeated_press_events_do_not_duplicate_moves() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.handle_key_press(KeyCode::Right), Some(GameAction::Move(MoveDirection::Right)));
        assert_eq!(ih.handle_key_press(KeyCode::Right), None);
    }

    #[test]
    fn test_auto_release_triggers_after_timeout_without_key_release_events() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(LEFT));
        ih.handle_key_press(KeyCode::Char(' '));
        assert_eq!(ih.drop_multiplier(), SOFT_DROP_MULTIPLIER as f32);

        // Simulate no key-release events by moving the last key time into the past.
        ih.last_key_time = std::time::Instant::now() - std::time::Duration::from_millis(51);

        assert!(ih.update(0).is_empty());
        assert_eq!(ih.held_direction(), None);
        assert_eq!(ih.drop_multiplier(), 1.0);
    }

    #[test]
    fn test_drop_key_release() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);
        assert_eq!(ih.handle_key_press(KeyCode::Char(' ')), None);
        assert!(ih.drop_multiplier() > 1.0);
        ih.handle_key_release(KeyCode::Char(' '));
        assert_eq!(ih.drop_multiplier(), 1.0);
    }

    #[test]
    fn test_non_movement_key_is_ignored() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.handle_key_press(KeyCode::Char('x')), None);
        assert_eq!(ih.held_direction(), None);
    }

    #[test]
    fn test_reset_clears_held_state_and_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(LEFT));
        assert!(!ih.update(200).is_empty(), "expected repeats before reset");

        ih.reset();
        assert!(ih.update(200).is_empty(), "reset should stop repeats");
    }
}

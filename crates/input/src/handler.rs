//! DAS/ARR input handler for terminal environments.
//!
//! Held left/right keys repeat after a DAS delay at the ARR rate; held soft drop
//! repeats right away at its own rate. Supports terminals that do not emit key
//! release events by using a timeout.

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use arrayvec::ArrayVec;

use crate::types::{Command, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS};

/// Maximum number of repeats produced by one [`InputHandler::update`] call.
pub const MAX_REPEATS_PER_UPDATE: usize = 32;

/// Commands produced by one update
pub type RepeatCommands = ArrayVec<Command, MAX_REPEATS_PER_UPDATE>;

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn command(self) -> Option<Command> {
        match self {
            HorizontalDirection::Left => Some(Command::MoveLeft),
            HorizontalDirection::Right => Some(Command::MoveRight),
            HorizontalDirection::None => None,
        }
    }
}

/// Keys the handler tracks as "held"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeldKey {
    Left,
    Right,
    Down,
}

fn held_key(code: KeyCode) -> Option<HeldKey> {
    match code {
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h' | 'H') => Some(HeldKey::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L') => Some(HeldKey::Right),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j' | 'J') => Some(HeldKey::Down),
        _ => None,
    }
}

/// DAS timer plus ARR accumulator for one held key.
#[derive(Debug, Clone, Copy, Default)]
struct Repeat {
    das_timer: u32,
    arr_accumulator: u32,
}

impl Repeat {
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance by `elapsed_ms` and return how many repeats fell due.
    ///
    /// Only time past the DAS delay counts towards ARR.
    fn advance(&mut self, elapsed_ms: u32, das_ms: u32, arr_ms: u32) -> u32 {
        let prev_das = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer < das_ms {
            return 0;
        }

        let excess = if prev_das < das_ms {
            self.das_timer - das_ms
        } else {
            elapsed_ms
        };
        self.arr_accumulator = self.arr_accumulator.saturating_add(excess);

        let arr_ms = arr_ms.max(1);
        let due = self.arr_accumulator / arr_ms;
        self.arr_accumulator %= arr_ms;
        due
    }
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    last_key_time: Instant,
    horizontal_repeat: Repeat,
    down_repeat: Repeat,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that triggers DAS/ARR repeats.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            last_key_time: Instant::now(),
            horizontal_repeat: Repeat::default(),
            down_repeat: Repeat::default(),
            das_delay,
            arr_rate,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// True for keys whose repeats this handler owns (left, right, soft drop).
    pub fn handles(code: KeyCode) -> bool {
        held_key(code).is_some()
    }

    /// Register a key press. Returns the command for the initial press, or
    /// `None` if the key is already held or is not a repeatable key.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Command> {
        let key = held_key(code)?;
        self.last_key_time = Instant::now();

        match key {
            HeldKey::Left | HeldKey::Right => {
                let direction = if key == HeldKey::Left {
                    HorizontalDirection::Left
                } else {
                    HorizontalDirection::Right
                };
                if self.horizontal == direction {
                    return None;
                }
                self.horizontal = direction;
                self.horizontal_repeat.reset();
                direction.command()
            }
            HeldKey::Down => {
                if self.down_held {
                    return None;
                }
                self.down_held = true;
                self.down_repeat.reset();
                Some(Command::SoftDrop)
            }
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match held_key(code) {
            Some(HeldKey::Left) if self.horizontal == HorizontalDirection::Left => {
                self.release_horizontal();
            }
            Some(HeldKey::Right) if self.horizontal == HorizontalDirection::Right => {
                self.release_horizontal();
            }
            Some(HeldKey::Down) => self.release_down(),
            _ => {}
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.horizontal_repeat.reset();
    }

    fn release_down(&mut self) {
        self.down_held = false;
        self.down_repeat.reset();
    }

    /// Advance held-key timers and return the repeat commands that fell due.
    pub fn update(&mut self, elapsed_ms: u32) -> RepeatCommands {
        let mut commands = RepeatCommands::new();

        // Auto-release when terminal does not emit release events.
        let time_since_last_key = self.last_key_time.elapsed();
        if time_since_last_key > Duration::from_millis(self.key_release_timeout_ms as u64) {
            if self.horizontal != HorizontalDirection::None {
                self.release_horizontal();
            }
            if self.down_held {
                self.release_down();
            }
        }

        if let Some(command) = self.horizontal.command() {
            let due = self
                .horizontal_repeat
                .advance(elapsed_ms, self.das_delay, self.arr_rate);
            for _ in 0..due {
                if commands.try_push(command).is_err() {
                    break;
                }
            }
        }

        if self.down_held {
            let due = self
                .down_repeat
                .advance(elapsed_ms, SOFT_DROP_DAS_MS, SOFT_DROP_ARR_MS);
            for _ in 0..due {
                if commands.try_push(Command::SoftDrop).is_err() {
                    break;
                }
            }
        }

        commands
    }

    /// Forget all held keys (used on pause, restart and focus loss).
    pub fn reset(&mut self) {
        self.release_horizontal();
        self.release_down();
        self.last_key_time = Instant::now();
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

    #[test]
    fn test_horizontal_das_arr_repeats_after_delay() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(Command::MoveLeft));

        // Before DAS expires: no repeats.
        assert!(ih.update(99).is_empty());

        // Exactly at DAS: still no repeats (needs excess over DAS to accumulate ARR).
        assert!(ih.update(1).is_empty());

        assert_eq!(ih.update(25).as_slice(), &[Command::MoveLeft]);
        assert_eq!(ih.update(25).as_slice(), &[Command::MoveLeft]);
    }

    #[test]
    fn test_default_rates() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);
        assert_eq!(ih.handle_key_press(KeyCode::Char('d')), Some(Command::MoveRight));

        assert!(ih.update(DEFAULT_DAS_MS).is_empty());
        assert_eq!(ih.update(DEFAULT_ARR_MS).as_slice(), &[Command::MoveRight]);
        assert_eq!(
            ih.update(2 * DEFAULT_ARR_MS).as_slice(),
            &[Command::MoveRight, Command::MoveRight]
        );
    }

    #[test]
    fn test_repeated_press_is_ignored_while_held() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.handle_key_press(KeyCode::Right), Some(Command::MoveRight));
        assert_eq!(ih.handle_key_press(KeyCode::Right), None);
        assert_eq!(ih.handle_key_press(KeyCode::Char('h')), Some(Command::MoveLeft));
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut ih = InputHandler::with_config(50, 10).with_key_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Left);
        ih.handle_key_release(KeyCode::Right);
        assert_eq!(ih.horizontal, HorizontalDirection::Left);

        ih.handle_key_release(KeyCode::Left);
        assert!(ih.update(500).is_empty());
    }

    #[test]
    fn test_auto_release_triggers_after_timeout_without_key_release_events() {
        let mut ih = InputHandler::with_config(100, 25);
        ih.key_release_timeout_ms = 50;

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(Command::MoveLeft));
        assert_eq!(ih.horizontal, HorizontalDirection::Left);

        // Simulate no key-release events by moving the last key time into the past.
        ih.last_key_time = Instant::now() - Duration::from_millis(51);

        assert!(ih.update(0).is_empty());
        assert_eq!(ih.horizontal, HorizontalDirection::None);
    }

    #[test]
    fn test_non_movement_key_does_not_extend_auto_release_timeout() {
        let mut ih = InputHandler::with_config(100, 25);
        ih.key_release_timeout_ms = 50;

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(Command::MoveLeft));

        ih.last_key_time = Instant::now() - Duration::from_millis(51);
        assert_eq!(ih.handle_key_press(KeyCode::Up), None);

        assert!(ih.update(0).is_empty());
        assert_eq!(ih.horizontal, HorizontalDirection::None);
    }

    #[test]
    fn test_soft_drop_repeats_use_zero_das_and_50ms_arr() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Down), Some(Command::SoftDrop));

        assert!(ih.update(49).is_empty());
        assert_eq!(ih.update(1).as_slice(), &[Command::SoftDrop]);
        assert_eq!(
            ih.update(100).as_slice(),
            &[Command::SoftDrop, Command::SoftDrop]
        );
    }

    #[test]
    fn test_repeats_are_capped_per_update() {
        let mut ih = InputHandler::with_config(0, 1).with_key_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Left);
        assert_eq!(ih.update(10_000).len(), MAX_REPEATS_PER_UPDATE);
    }

    #[test]
    fn test_reset_clears_held_state_and_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(Command::MoveLeft));
        assert!(!ih.update(200).is_empty(), "expected repeats before reset");

        ih.reset();
        assert!(ih.update(200).is_empty(), "reset should stop repeats");
    }

    #[test]
    fn test_handles_only_repeatable_keys() {
        assert!(InputHandler::handles(KeyCode::Left));
        assert!(InputHandler::handles(KeyCode::Char('j')));
        assert!(!InputHandler::handles(KeyCode::Up));
        assert!(!InputHandler::handles(KeyCode::Char(' ')));
    }
}

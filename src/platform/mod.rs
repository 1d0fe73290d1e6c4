//! Platform abstraction layer
//!
//! Keyboard state is owned by the platform backend. The core only asks
//! "is this key down right now?" once per frame and never keeps input
//! state beyond that frame.

use std::collections::{HashSet, VecDeque};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape
    Quit,
    /// P
    Pause,
    /// R
    Restart,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

impl Key {
    pub const ALL: [Key; 5] = [Key::Quit, Key::Pause, Key::Restart, Key::Left, Key::Right];
}

/// Boolean key-down queries, supplied to the core each frame
pub trait InputSource {
    /// Pump pending platform events before the frame's key queries
    fn begin_frame(&mut self) {}

    fn is_key_down(&self, key: Key) -> bool;
}

/// Input source driven by a prepared script (tests and headless runs)
///
/// Each queued frame lists the keys held during that frame. Once the
/// script runs out, the keys in `held` stay down.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<Key>>,
    held: HashSet<Key>,
    current: HashSet<Key>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one frame with the given keys down
    pub fn then(mut self, keys: &[Key]) -> Self {
        self.frames.push_back(keys.to_vec());
        self
    }

    /// Queue `count` frames with the given keys down
    pub fn repeat(mut self, keys: &[Key], count: usize) -> Self {
        for _ in 0..count {
            self.frames.push_back(keys.to_vec());
        }
        self
    }

    /// Keep a key down on every frame after the script runs out
    pub fn hold(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Frames left in the script
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn begin_frame(&mut self) {
        self.current = match self.frames.pop_front() {
            Some(keys) => keys.into_iter().collect(),
            None => self.held.clone(),
        };
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.current.contains(&key)
    }
}

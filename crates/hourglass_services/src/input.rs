//! Input abstraction: scripted and stream-backed token sources
//!
//! The simulation pulls one token at a time. A token is a single character
//! decoded into a `Command` through a fixed key map.

use hourglass_core::math::IVec2;
use once_cell::sync::Lazy;
use std::collections::{HashMap, VecDeque};
use std::io::Read;
use thiserror::Error;

/// Decoded player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Step by the given offset.
    Move(IVec2),
    /// Stay in place.
    Wait,
    Pickup,
    /// Area pulse against everything hostile in sight.
    Pulse,
    /// Steal time from the nearest enemy.
    Siphon,
    Ascend,
    Descend,
    Help,
    /// Debug query: report the player's position.
    Query,
    Quit,
    /// Anything unmapped. Consumes the turn and does nothing.
    Unknown(char),
}

impl Command {
    pub fn decode(token: char) -> Command {
        KEYMAP
            .get(&token)
            .copied()
            .unwrap_or(Command::Unknown(token))
    }

    /// Whether this command leaves the turn unspent.
    pub fn is_abortive(&self) -> bool {
        matches!(self, Command::Help | Command::Query)
    }
}

static KEYMAP: Lazy<HashMap<char, Command>> = Lazy::new(|| {
    HashMap::from([
        ('h', Command::Move(IVec2::new(-1, 0))),
        ('l', Command::Move(IVec2::new(1, 0))),
        ('j', Command::Move(IVec2::new(0, 1))),
        ('k', Command::Move(IVec2::new(0, -1))),
        ('y', Command::Move(IVec2::new(-1, -1))),
        ('u', Command::Move(IVec2::new(1, -1))),
        ('b', Command::Move(IVec2::new(-1, 1))),
        ('n', Command::Move(IVec2::new(1, 1))),
        ('.', Command::Wait),
        ('g', Command::Pickup),
        ('x', Command::Pulse),
        ('z', Command::Siphon),
        ('<', Command::Ascend),
        ('>', Command::Descend),
        ('?', Command::Help),
        ('#', Command::Query),
        ('q', Command::Quit),
    ])
});

pub const HELP_TEXT: &str = "hjklyubn: move  .: wait  g: pick up\n\
x: time pulse  z: time siphon\n\
<: ascend  >: descend  q: quit";

/// Errors raised while reading input. Both end the run.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input stream exhausted")]
    Exhausted,
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Blocking, pull-based source of input tokens.
pub trait InputSource {
    fn next_token(&mut self) -> Result<char, InputError>;
}

/// Replays a fixed token sequence, then reports exhaustion.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    tokens: VecDeque<char>,
}

impl ScriptedInput {
    pub fn new(tokens: &str) -> Self {
        Self {
            tokens: tokens.chars().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_token(&mut self) -> Result<char, InputError> {
        let token = self.tokens.pop_front().ok_or(InputError::Exhausted)?;
        tracing::trace!(token = %token, "scripted input");
        Ok(token)
    }
}

/// Pulls tokens from any byte stream, one per UTF-8 character. Whitespace
/// is skipped so line-buffered terminals and piped files both work. A
/// malformed sequence becomes a single `U+FFFD` token.
#[derive(Debug)]
pub struct ReaderInput<R> {
    reader: R,
}

impl<R: Read> ReaderInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn next_char(&mut self) -> Result<char, InputError> {
        let mut buf = [0u8; 4];
        if self.reader.read(&mut buf[..1])? == 0 {
            return Err(InputError::Exhausted);
        }
        let len = match buf[0] {
            0x00..=0x7f => 1,
            0xc0..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf7 => 4,
            _ => return Ok(char::REPLACEMENT_CHARACTER),
        };
        if let Err(err) = self.reader.read_exact(&mut buf[1..len]) {
            return Err(match err.kind() {
                std::io::ErrorKind::UnexpectedEof => InputError::Exhausted,
                _ => err.into(),
            });
        }
        Ok(std::str::from_utf8(&buf[..len])
            .ok()
            .and_then(|text| text.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER))
    }
}

impl<R: Read> InputSource for ReaderInput<R> {
    fn next_token(&mut self) -> Result<char, InputError> {
        loop {
            let token = self.next_char()?;
            if !token.is_whitespace() {
                return Ok(token);
            }
        }
    }
}

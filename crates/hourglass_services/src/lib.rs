//! Hourglass Services Layer
//!
//! Boundary services around the simulation: command decoding, input sources
//! and settings.

pub mod input;
pub mod settings;

pub use input::{Command, InputError, InputSource, ReaderInput, ScriptedInput};
pub use settings::{MapSettings, RuleSettings, ScreenSettings, Settings, SettingsError};

//! Terminal driver for the `calc-core` engine: key labels, a session with the
//! usual calculator-screen conventions, TOML settings, logging and key tapes.

pub mod display;
pub mod keys;
pub mod logging;
pub mod session;
pub mod settings;
pub mod tape;

pub use display::DisplayFormatter;
pub use keys::{Key, KeyParseError};
pub use session::{Session, SessionError};
pub use settings::{Settings, SettingsError};

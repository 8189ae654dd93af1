//! Key echo diagnostic.
//!
//! Reads keys from the terminal through an input session and prints each
//! character's bytes, so terminal and keymap issues can be checked by hand.
//!
//! ```bash
//! cargo run --features keytest --bin nut-input-keytest [settings.toml]
//! ```
//!
//! Settings file (all keys optional):
//!
//! ```toml
//! keyboard_timeout_us = 100000
//! event_hook = false
//! raw_mode = true
//! ```
//!
//! Ctrl-D on its own quits. Logging goes to stderr and is controlled by
//! `NUT_INPUT_LOG` (e.g. `NUT_INPUT_LOG=nut_input=trace`).

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use nut_input::{
    CaughtSignals, Decoded, FdInput, InputError, InputHooks, InputSession, InputState,
    Utf8Decoder,
};

const CTRL_D: u8 = 0x04;

// =============================================================================
// Settings
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Settings {
    /// Availability timeout in microseconds
    keyboard_timeout_us: u32,
    /// Poll with an idle callback instead of blocking
    event_hook: bool,
    /// Put the terminal in raw mode while running
    raw_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keyboard_timeout_us: 100_000,
            event_hook: false,
            raw_mode: true,
        }
    }
}

impl Settings {
    fn load(path: Option<&Path>) -> Result<Self, String> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("{}: {}", path.display(), e))
    }
}

// =============================================================================
// Terminal Raw Mode Guard
// =============================================================================

/// Enables raw terminal mode on creation and restores it on drop.
struct RawModeGuard;

impl RawModeGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

// =============================================================================
// Idle callback
// =============================================================================

/// Counts idle ticks when the event hook is enabled.
#[derive(Debug, Default)]
struct IdleTicks {
    enabled: bool,
    ticks: u64,
}

impl InputHooks<{ nut_input::typeahead::DEFAULT_TYPEAHEAD }> for IdleTicks {
    fn has_event_hook(&self) -> bool {
        self.enabled
    }

    fn on_wait_tick(&mut self, _state: &mut InputState) {
        self.ticks += 1;
        tracing::trace!(ticks = self.ticks, "idle");
    }
}

// =============================================================================
// Main
// =============================================================================

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("NUT_INPUT_LOG"))
        .with_writer(io::stderr)
        .init();

    let path = std::env::args_os().nth(1);
    let settings = match Settings::load(path.as_deref().map(Path::new)) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("keytest: {}", err);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(?settings, "loaded settings");

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("keytest: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> io::Result<()> {
    let signals = CaughtSignals::new()?;
    let _guard = if settings.raw_mode {
        Some(RawModeGuard::new()?)
    } else {
        None
    };

    let hooks = IdleTicks {
        enabled: settings.event_hook,
        ticks: 0,
    };
    let mut session = InputSession::new(FdInput::new(io::stdin()), hooks, signals);
    session.set_keyboard_timeout(settings.keyboard_timeout_us);

    let mut stdout = io::stdout().lock();
    write!(stdout, "Press keys (Ctrl-D quits)\r\n")?;
    stdout.flush()?;

    let mut decoder = Utf8Decoder::new();
    loop {
        session.state_mut().set_reading_command(true);
        let mut buf = [0u8; 4];
        let read = session.read_mbchar(&mut decoder, &mut buf);
        session.state_mut().set_reading_command(false);

        let read = match read {
            Ok(read) => read,
            Err(InputError::Terminated(signal)) => {
                write!(stdout, "terminated by {}\r\n", signal)?;
                break;
            }
            Err(err) => {
                write!(stdout, "{}\r\n", err)?;
                break;
            }
        };

        let bytes = &buf[..read.len];
        if bytes == [CTRL_D] {
            break;
        }

        for b in bytes {
            write!(stdout, "{:02x} ", b)?;
        }
        match read.decoded {
            Decoded::Char(c) if c.is_ascii_control() => {
                write!(stdout, " ^{}", char::from((c as u8) ^ 0x40))?
            }
            Decoded::Char(c) => write!(stdout, " {:?}", c)?,
            Decoded::Null => write!(stdout, " NUL")?,
            Decoded::Incomplete => write!(stdout, " (incomplete)")?,
            Decoded::Invalid => write!(stdout, " (invalid)")?,
        }
        if session.signals_mut().take_resize() {
            write!(stdout, "  [resized]")?;
        }
        write!(stdout, "\r\n")?;
        stdout.flush()?;
    }

    tracing::debug!(ticks = session.hooks().ticks, "keytest done");
    stdout.flush()
}

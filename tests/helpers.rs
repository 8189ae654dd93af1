//! Shared test helpers to reduce duplication across integration tests.

#![allow(dead_code)]

#[allow(clippy::duplicate_mod)]
#[path = "fixtures/mod.rs"]
mod fixtures;

#[allow(unused_imports)]
pub use fixtures::{RecordingHooks, ScriptedInput, ScriptedSignals, Step};

use nut_input::{InputError, InputSession, NoHooks, NoSignals};

/// Typeahead capacity used by most integration tests.
pub const SMALL: usize = 16;

/// Session type without hooks or signals.
pub type PlainSession<const N: usize = SMALL> = InputSession<ScriptedInput, NoHooks, NoSignals, N>;

/// Session type with recording hooks and scripted signals.
pub type ScriptedSession<const N: usize = SMALL> =
    InputSession<ScriptedInput, RecordingHooks<N>, ScriptedSignals, N>;

// ============================================================================
// Session Creation Helpers
// ============================================================================

/// Session reading `bytes`, then end of stream.
pub fn plain_session(bytes: &[u8]) -> PlainSession {
    InputSession::new(ScriptedInput::bytes(bytes), NoHooks, NoSignals)
}

/// Session with every collaborator scripted.
pub fn scripted_session(
    input: ScriptedInput,
    hooks: RecordingHooks<SMALL>,
    signals: ScriptedSignals,
) -> ScriptedSession {
    InputSession::new(input, hooks, signals)
}

// ============================================================================
// Reading Helpers
// ============================================================================

/// Read keys until the first error, returning the keys and the error.
pub fn read_all<F>(mut read: F) -> (Vec<u8>, InputError)
where
    F: FnMut() -> Result<u8, InputError>,
{
    let mut keys = Vec::new();
    loop {
        match read() {
            Ok(key) => keys.push(key),
            Err(err) => return (keys, err),
        }
    }
}

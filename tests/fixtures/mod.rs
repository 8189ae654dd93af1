//! Test fixtures and utilities for nut-input testing.
//!
//! Provides:
//! - `ScriptedInput`: `RawInput` replaying a fixed script of read outcomes
//! - `RecordingHooks`: `InputHooks` with macro playback and call counters
//! - `ScriptedSignals`: `SignalCheck` with queued check results

#![allow(dead_code)]

use nut_input::{InputHooks, InputState, RawError, RawInput, Signal, SignalCheck};
use std::collections::VecDeque;
use std::time::Duration;

// ============================================================================
// ScriptedInput - Test Raw Input
// ============================================================================

/// One outcome of a raw read.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    /// A byte arrives
    Byte(u8),
    /// End of stream
    Eof,
    /// The read fails
    Fail(RawError),
}

/// Raw input replaying a script.
///
/// Once the script is exhausted every read reports end of stream. When
/// `report_queue` is set, `queued_len()` reports the number of scripted
/// bytes up to the first non-byte step, like `FIONREAD` would.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    /// Remaining outcomes
    pub steps: VecDeque<Step>,

    /// Answer `queued_len()` from the script
    pub report_queue: bool,

    /// Answer for `poll_readable()`, `None` if unsupported
    pub poll: Option<bool>,

    /// Support the non-blocking probe (would-block once the script is empty)
    pub probe: bool,

    /// Number of `read_byte()` calls
    pub reads: usize,

    /// Number of `set_blocking()` calls
    pub blocking_resets: usize,

    /// Timeouts passed to `poll_readable()`
    pub poll_timeouts: Vec<Duration>,
}

impl ScriptedInput {
    /// Script that delivers `bytes` and then end of stream.
    pub fn bytes(bytes: &[u8]) -> Self {
        Self {
            steps: bytes.iter().copied().map(Step::Byte).collect(),
            ..Self::default()
        }
    }

    /// Script of arbitrary steps.
    pub fn steps(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Report the scripted byte count through `queued_len()`.
    pub fn with_queue_report(mut self) -> Self {
        self.report_queue = true;
        self
    }

    /// Support the non-blocking probe.
    pub fn with_probe(mut self) -> Self {
        self.probe = true;
        self
    }

    /// Answer `poll_readable()` with `ready`.
    pub fn with_poll(mut self, ready: bool) -> Self {
        self.poll = Some(ready);
        self
    }

    /// Append bytes to the script.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.steps.extend(bytes.iter().copied().map(Step::Byte));
    }

    /// Bytes still scripted before the first non-byte step.
    pub fn queued_bytes(&self) -> usize {
        self.steps
            .iter()
            .take_while(|s| matches!(s, Step::Byte(_)))
            .count()
    }
}

impl RawInput for ScriptedInput {
    fn read_byte(&mut self) -> Result<Option<u8>, RawError> {
        self.reads += 1;
        match self.steps.pop_front() {
            Some(Step::Byte(b)) => Ok(Some(b)),
            Some(Step::Eof) | None => Ok(None),
            Some(Step::Fail(err)) => Err(err),
        }
    }

    fn poll_readable(&mut self, timeout: Duration) -> Option<bool> {
        self.poll_timeouts.push(timeout);
        self.poll
    }

    fn queued_len(&mut self) -> Result<Option<usize>, RawError> {
        if self.report_queue {
            Ok(Some(self.queued_bytes()))
        } else {
            Ok(None)
        }
    }

    fn read_byte_nonblocking(&mut self) -> Result<Option<u8>, RawError> {
        if !self.probe || self.steps.is_empty() {
            return Err(RawError::WouldBlock);
        }
        self.read_byte()
    }

    fn set_blocking(&mut self) -> Result<(), RawError> {
        self.blocking_resets += 1;
        Ok(())
    }
}

// ============================================================================
// RecordingHooks - Test Hooks
// ============================================================================

/// Action run on each idle tick.
pub type TickAction<const N: usize> = Box<dyn FnMut(usize, &mut InputState<N>)>;

/// Hooks with macro playback, an optional event hook and call counters.
pub struct RecordingHooks<const N: usize> {
    /// Keys of the playing macro
    pub macro_keys: VecDeque<u8>,

    /// Event hook installed
    pub event_hook: bool,

    /// Called with the tick number on each idle tick
    pub on_tick: Option<TickAction<N>>,

    /// Number of idle ticks
    pub ticks: usize,

    /// Number of signal-event calls
    pub signal_events: usize,

    /// Availability hook answer
    pub available: Option<bool>,
}

impl<const N: usize> RecordingHooks<N> {
    /// No macro, no event hook.
    pub fn new() -> Self {
        Self {
            macro_keys: VecDeque::new(),
            event_hook: false,
            on_tick: None,
            ticks: 0,
            signal_events: 0,
            available: None,
        }
    }

    /// Play `keys` as a macro.
    pub fn with_macro(mut self, keys: &[u8]) -> Self {
        self.macro_keys.extend(keys.iter().copied());
        self
    }

    /// Install an event hook running `action` on every tick.
    pub fn with_event_hook(mut self, action: impl FnMut(usize, &mut InputState<N>) + 'static) -> Self {
        self.event_hook = true;
        self.on_tick = Some(Box::new(action));
        self
    }
}

impl<const N: usize> Default for RecordingHooks<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> InputHooks<N> for RecordingHooks<N> {
    fn has_event_hook(&self) -> bool {
        self.event_hook
    }

    fn on_wait_tick(&mut self, state: &mut InputState<N>) {
        self.ticks += 1;
        if let Some(action) = self.on_tick.as_mut() {
            action(self.ticks, state);
        }
    }

    fn on_signal_event(&mut self, _state: &mut InputState<N>) {
        self.signal_events += 1;
    }

    fn input_available(&mut self, _state: &InputState<N>) -> Option<bool> {
        self.available
    }

    fn next_macro_key(&mut self) -> Option<u8> {
        self.macro_keys.pop_front()
    }
}

// ============================================================================
// ScriptedSignals - Test Signal Check
// ============================================================================

/// Signal check with a fixed caught signal and queued check outcomes.
///
/// `check()` pops the next outcome, `Ok(())` once the queue is empty.
/// `caught` stays set, as if the signal arrived during every read.
#[derive(Debug, Default)]
pub struct ScriptedSignals {
    /// Signal reported by `caught()`
    pub caught: Option<Signal>,

    /// Outcomes returned by `check()`
    pub outcomes: VecDeque<Result<(), Signal>>,

    /// Number of `check()` calls
    pub checks: usize,
}

impl ScriptedSignals {
    /// Report `signal` as caught; checks succeed.
    pub fn with_caught(signal: Signal) -> Self {
        Self {
            caught: Some(signal),
            ..Self::default()
        }
    }

    /// Report `signal` as caught and fail the next check with it.
    pub fn terminating(signal: Signal) -> Self {
        Self {
            caught: Some(signal),
            outcomes: VecDeque::from([Err(signal)]),
            checks: 0,
        }
    }
}

impl SignalCheck for ScriptedSignals {
    fn caught(&self) -> Option<Signal> {
        self.caught
    }

    fn check(&mut self) -> Result<(), Signal> {
        self.checks += 1;
        self.outcomes.pop_front().unwrap_or(Ok(()))
    }
}

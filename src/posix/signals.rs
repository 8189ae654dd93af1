//! Signal monitor backed by `signal-hook`.
//!
//! Handlers only record the signal number; everything else happens when the
//! key reader calls [`SignalCheck::check()`] from normal context.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::vec::Vec;

use signal_hook::SigId;
use signal_hook::consts::signal::{
    SIGALRM, SIGHUP, SIGINT, SIGQUIT, SIGTERM, SIGTSTP, SIGVTALRM, SIGWINCH,
};

use crate::signal::{Signal, SignalCheck};

/// Signals watched by [`CaughtSignals::new()`].
pub const WATCHED: [Signal; 8] = [
    Signal::Hangup,
    Signal::Terminate,
    Signal::Interrupt,
    Signal::Quit,
    Signal::Suspend,
    Signal::WindowChange,
    Signal::Alarm,
    Signal::VirtualAlarm,
];

/// Platform signal number.
pub fn raw_signal(signal: Signal) -> i32 {
    match signal {
        Signal::Hangup => SIGHUP,
        Signal::Terminate => SIGTERM,
        Signal::Interrupt => SIGINT,
        Signal::Quit => SIGQUIT,
        Signal::Suspend => SIGTSTP,
        Signal::WindowChange => SIGWINCH,
        Signal::Alarm => SIGALRM,
        Signal::VirtualAlarm => SIGVTALRM,
        Signal::Other(n) => n,
    }
}

/// Classify a platform signal number.
pub fn signal_from_raw(raw: i32) -> Signal {
    match raw {
        SIGHUP => Signal::Hangup,
        SIGTERM => Signal::Terminate,
        SIGINT => Signal::Interrupt,
        SIGQUIT => Signal::Quit,
        SIGTSTP => Signal::Suspend,
        SIGWINCH => Signal::WindowChange,
        SIGALRM => Signal::Alarm,
        SIGVTALRM => Signal::VirtualAlarm,
        n => Signal::Other(n),
    }
}

/// Records caught signals for the key reader.
///
/// `check()` consumes the most recent signal. Keyboard-generated and fatal
/// signals ask the reader to stop (`Err`); window changes and timers are
/// absorbed, with window changes remembered for [`take_resize()`](Self::take_resize).
/// Handlers are removed on drop.
#[derive(Debug)]
pub struct CaughtSignals {
    last: Arc<AtomicUsize>,
    resized: Arc<AtomicBool>,
    ids: Vec<SigId>,
}

impl CaughtSignals {
    /// Watch every signal in [`WATCHED`].
    pub fn new() -> io::Result<Self> {
        Self::watch(&WATCHED)
    }

    /// Watch the given signals.
    pub fn watch(signals: &[Signal]) -> io::Result<Self> {
        let last = Arc::new(AtomicUsize::new(0));
        let resized = Arc::new(AtomicBool::new(false));
        let mut ids = Vec::with_capacity(signals.len() + 1);

        for &signal in signals {
            let raw = raw_signal(signal);
            let value = usize::try_from(raw)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "negative signal number"))?;
            ids.push(signal_hook::flag::register_usize(raw, Arc::clone(&last), value)?);
            if signal == Signal::WindowChange {
                ids.push(signal_hook::flag::register(raw, Arc::clone(&resized))?);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(count = signals.len(), "signal handlers installed");

        Ok(Self { last, resized, ids })
    }

    /// True once per window-size change since the last call.
    pub fn take_resize(&self) -> bool {
        self.resized.swap(false, Ordering::AcqRel)
    }

    /// Record `signal` as if its handler had run.
    pub fn raise_flag(&self, signal: Signal) {
        if let Ok(value) = usize::try_from(raw_signal(signal)) {
            self.last.store(value, Ordering::Release);
        }
        if signal == Signal::WindowChange {
            self.resized.store(true, Ordering::Release);
        }
    }
}

impl SignalCheck for CaughtSignals {
    fn caught(&self) -> Option<Signal> {
        match self.last.load(Ordering::Acquire) {
            0 => None,
            raw => i32::try_from(raw).ok().map(signal_from_raw),
        }
    }

    fn check(&mut self) -> Result<(), Signal> {
        let raw = self.last.swap(0, Ordering::AcqRel);
        if raw == 0 {
            return Ok(());
        }

        let Ok(raw) = i32::try_from(raw) else {
            return Ok(());
        };
        let signal = signal_from_raw(raw);

        #[cfg(feature = "tracing")]
        tracing::debug!(%signal, "handling caught signal");

        if signal.is_fatal() || signal.is_keyboard() {
            Err(signal)
        } else {
            Ok(())
        }
    }
}

impl Drop for CaughtSignals {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            signal_hook::low_level::unregister(id);
        }
    }
}

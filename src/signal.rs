//! Signal state as seen by the key reader.
//!
//! The reader never installs handlers itself. It asks a [`SignalCheck`]
//! which signal was caught most recently and lets it handle pending ones.
//! A check that wants the read path abandoned says so through its return
//! value; the reader propagates that as [`InputError::Terminated`].
//!
//! [`InputError::Terminated`]: crate::InputError::Terminated

use core::fmt;

/// Signals the key reader distinguishes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Signal {
    /// SIGHUP
    Hangup,
    /// SIGTERM
    Terminate,
    /// SIGINT
    Interrupt,
    /// SIGQUIT
    Quit,
    /// SIGTSTP
    Suspend,
    /// SIGWINCH
    WindowChange,
    /// SIGALRM
    Alarm,
    /// SIGVTALRM
    VirtualAlarm,
    /// Any other signal number
    Other(i32),
}

impl Signal {
    /// Hang-up and terminate end the current read.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Signal::Hangup | Signal::Terminate)
    }

    /// Generated by the terminal driver from a keystroke.
    pub fn is_keyboard(&self) -> bool {
        matches!(self, Signal::Interrupt | Signal::Quit | Signal::Suspend)
    }

    /// Window-size changes and timers.
    pub fn is_async(&self) -> bool {
        matches!(
            self,
            Signal::WindowChange | Signal::Alarm | Signal::VirtualAlarm
        )
    }

    /// Conventional name, e.g. `SIGWINCH`.
    pub fn name(&self) -> &'static str {
        match self {
            Signal::Hangup => "SIGHUP",
            Signal::Terminate => "SIGTERM",
            Signal::Interrupt => "SIGINT",
            Signal::Quit => "SIGQUIT",
            Signal::Suspend => "SIGTSTP",
            Signal::WindowChange => "SIGWINCH",
            Signal::Alarm => "SIGALRM",
            Signal::VirtualAlarm => "SIGVTALRM",
            Signal::Other(_) => "signal",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Other(n) => write!(f, "signal {}", n),
            _ => f.write_str(self.name()),
        }
    }
}

/// Signal-check collaborator.
///
/// `caught()` peeks at the most recent signal without consuming it.
/// `check()` handles whatever is pending; `Err(signal)` means the caller
/// must leave the read path (the reader returns `Terminated(signal)`).
pub trait SignalCheck {
    /// Most recently caught signal, if any is still pending.
    fn caught(&self) -> Option<Signal>;

    /// Handle pending signals.
    fn check(&mut self) -> Result<(), Signal>;
}

/// Signal check for embeddings that handle signals elsewhere.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct NoSignals;

impl SignalCheck for NoSignals {
    fn caught(&self) -> Option<Signal> {
        None
    }

    fn check(&mut self) -> Result<(), Signal> {
        Ok(())
    }
}

impl<S: SignalCheck + ?Sized> SignalCheck for &mut S {
    fn caught(&self) -> Option<Signal> {
        (**self).caught()
    }

    fn check(&mut self) -> Result<(), Signal> {
        (**self).check()
    }
}

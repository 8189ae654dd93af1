//! Embedding-application collaborators.
//!
//! `InputHooks` bundles the optional callbacks the key reader invokes while
//! it waits (event hook), after an interrupted read (signal event hook),
//! when asked whether input is available (availability hook), and the macro
//! playback source. Every method has a default matching "not installed".
//!
//! `Keymap` and `TextSink` are the two editor pieces the typein batcher
//! talks to.

use crate::session::InputState;

/// Optional callbacks driven by the key reader.
///
/// Hooks receive the session's [`InputState`] so they can stuff input,
/// schedule a pending key or mark the session done. All index and flag
/// updates are complete before any hook runs.
pub trait InputHooks<const N: usize> {
    /// Whether an event hook is installed.
    ///
    /// When true the key reader polls and gathers instead of blocking, and
    /// calls [`on_wait_tick()`](Self::on_wait_tick) between polls.
    fn has_event_hook(&self) -> bool {
        false
    }

    /// Event hook: called once per idle wait iteration.
    fn on_wait_tick(&mut self, state: &mut InputState<N>) {
        let _ = state;
    }

    /// Signal event hook: called after a read was interrupted by a
    /// non-fatal signal, before the read is retried.
    fn on_signal_event(&mut self, state: &mut InputState<N>) {
        let _ = state;
    }

    /// Availability hook. `Some(answer)` replaces the built-in check.
    fn input_available(&mut self, state: &InputState<N>) -> Option<bool> {
        let _ = state;
        None
    }

    /// Next key of an active macro, or `None` when no macro is playing.
    fn next_macro_key(&mut self) -> Option<u8> {
        None
    }
}

/// No hooks installed.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct NoHooks;

impl<const N: usize> InputHooks<N> for NoHooks {}

/// Event hook built from a closure.
///
/// The common case of an application that only wants to run something
/// while the user is idle.
pub struct EventHook<F> {
    tick: F,
}

impl<F> EventHook<F> {
    /// Wrap `tick` as the event hook.
    pub fn new(tick: F) -> Self {
        Self { tick }
    }
}

impl<F> core::fmt::Debug for EventHook<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventHook").finish_non_exhaustive()
    }
}

impl<F, const N: usize> InputHooks<N> for EventHook<F>
where
    F: FnMut(&mut InputState<N>),
{
    fn has_event_hook(&self) -> bool {
        true
    }

    fn on_wait_tick(&mut self, state: &mut InputState<N>) {
        (self.tick)(state)
    }
}

impl<H: InputHooks<N> + ?Sized, const N: usize> InputHooks<N> for &mut H {
    fn has_event_hook(&self) -> bool {
        (**self).has_event_hook()
    }

    fn on_wait_tick(&mut self, state: &mut InputState<N>) {
        (**self).on_wait_tick(state)
    }

    fn on_signal_event(&mut self, state: &mut InputState<N>) {
        (**self).on_signal_event(state)
    }

    fn input_available(&mut self, state: &InputState<N>) -> Option<bool> {
        (**self).input_available(state)
    }

    fn next_macro_key(&mut self) -> Option<u8> {
        (**self).next_macro_key()
    }
}

/// Key binding lookup used by typein batching.
pub trait Keymap {
    /// True if `key` is bound to the plain self-insert action.
    fn is_self_insert(&self, key: u8) -> bool;
}

impl<F: Fn(u8) -> bool> Keymap for F {
    fn is_self_insert(&self, key: u8) -> bool {
        self(key)
    }
}

/// Destination for batched typein.
pub trait TextSink {
    /// Insert `text` at the editor's point as one unit.
    fn insert_text(&mut self, text: &[u8]);
}

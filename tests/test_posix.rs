//! Descriptor input over a socket pair.
//!
//! Exercises the real `select`, `FIONREAD` and `O_NONBLOCK` paths through a
//! full session.

#![cfg(all(unix, feature = "std"))]

use std::io::Write;
use std::os::unix::net::UnixStream;

use nut_input::{
    CaughtSignals, EventHook, FdInput, InputError, InputSession, InputState, NoHooks, NoSignals,
    Signal, SignalCheck,
};

#[test]
fn test_blocking_reads_until_eof() {
    let (mut tx, rx) = UnixStream::pair().unwrap();
    tx.write_all(b"ok").unwrap();
    drop(tx);

    let mut s: InputSession<_, NoHooks, NoSignals, 16> =
        InputSession::new(FdInput::new(rx), NoHooks, NoSignals);
    assert_eq!(s.read_key(), Ok(b'o'));
    assert_eq!(s.read_key(), Ok(b'k'));
    assert_eq!(s.read_key(), Err(InputError::EndOfStream));
}

#[test]
fn test_blocking_read_waits_for_writer() {
    let (mut tx, rx) = UnixStream::pair().unwrap();
    let mut s: InputSession<_, NoHooks, NoSignals, 16> =
        InputSession::new(FdInput::new(rx), NoHooks, NoSignals);

    let writer = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(50));
        tx.write_all(b"y").unwrap();
    });
    assert_eq!(s.read_key(), Ok(b'y'));
    writer.join().unwrap();
}

#[test]
fn test_event_hook_gathers_from_socket() {
    let (mut tx, rx) = UnixStream::pair().unwrap();
    tx.write_all(b"ab\ncd").unwrap();

    let mut s = InputSession::new(
        FdInput::new(rx),
        EventHook::new(|_: &mut InputState<16>| {}),
        NoSignals,
    );
    s.set_keyboard_timeout(1_000);

    assert_eq!(s.read_key(), Ok(b'a'));
    assert!(s.state().typeahead().iter().copied().eq(*b"b\n"));
    assert_eq!(s.nchars_available(), Ok(2));
}

#[test]
fn test_availability_with_timeout() {
    let (mut tx, rx) = UnixStream::pair().unwrap();
    let mut s: InputSession<_, NoHooks, NoSignals, 16> =
        InputSession::new(FdInput::new(rx), NoHooks, NoSignals);

    assert!(!s.input_queued(1_000));
    tx.write_all(b"z").unwrap();
    assert!(s.input_queued(100_000));
    assert_eq!(s.keyboard_timeout(), 100_000);
}

#[test]
fn test_caught_signal_reported_by_session() {
    let signals = CaughtSignals::watch(&[Signal::Alarm]).unwrap();
    signals.raise_flag(Signal::Alarm);

    let (mut tx, rx) = UnixStream::pair().unwrap();
    tx.write_all(b"k").unwrap();
    let mut s: InputSession<_, NoHooks, _, 16> = InputSession::new(FdInput::new(rx), NoHooks, signals);

    // Timers are absorbed by the check
    assert_eq!(s.read_key(), Ok(b'k'));
    assert_eq!(s.signals_mut().caught(), None);
}

//! Property-based invariant tests for the typeahead buffer and key reader.
//!
//! These tests check, for arbitrary operation sequences:
//!
//! 1. Keys come out in FIFO order, with ungot keys at the front
//! 2. The buffer never holds more than `N - 1` bytes
//! 3. A failed stuff or unget leaves the buffer unchanged
//! 4. A pending key always precedes buffered keys
//! 5. Gathering never overfills and never reorders source bytes

#[allow(clippy::duplicate_mod)]
#[path = "helpers.rs"]
mod helpers;

use std::collections::VecDeque;

use helpers::ScriptedInput;
use nut_input::{InputSession, NoHooks, NoSignals, TypeaheadBuffer};
use proptest::prelude::*;

const CAP: usize = 8;

// ── Strategies ──────────────────────────────────────────────────────────

/// Operations that can be applied to a session state.
#[derive(Debug, Clone)]
enum Op {
    Stuff(u8),
    Unget(u8),
    Take,
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<u8>().prop_map(Op::Stuff),
        1 => any::<u8>().prop_map(Op::Unget),
        3 => Just(Op::Take),
        1 => Just(Op::Clear),
    ]
}

// ── Model ───────────────────────────────────────────────────────────────

fn apply(buf: &mut TypeaheadBuffer<CAP>, model: &mut VecDeque<u8>, op: &Op) {
    let usable = TypeaheadBuffer::<CAP>::USABLE;
    match *op {
        Op::Stuff(b) => {
            let fits = model.len() < usable;
            assert_eq!(buf.stuff(b), fits);
            if fits {
                model.push_back(b);
            }
        }
        Op::Unget(b) => {
            let fits = model.len() < usable;
            assert_eq!(buf.unstuff_front(b), fits);
            if fits {
                model.push_front(b);
            }
        }
        Op::Take => assert_eq!(buf.take(), model.pop_front()),
        Op::Clear => {
            buf.clear();
            model.clear();
        }
    }
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn buffer_matches_deque_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut buf = TypeaheadBuffer::<CAP>::new();
        let mut model = VecDeque::new();

        for op in &ops {
            apply(&mut buf, &mut model, op);
            prop_assert!(buf.len() <= CAP - 1);
            prop_assert_eq!(buf.len(), model.len());
            prop_assert_eq!(buf.space_available(), CAP - 1 - model.len());
            prop_assert!(buf.iter().eq(model.iter()));
        }
    }

    #[test]
    fn pending_key_precedes_buffer(
        pending in any::<u8>(),
        queued in prop::collection::vec(any::<u8>(), 0..CAP),
    ) {
        let mut s: InputSession<_, NoHooks, NoSignals, CAP> =
            InputSession::new(ScriptedInput::default(), NoHooks, NoSignals);
        let mut stuffed = Vec::new();
        for &b in &queued {
            if s.stuff_char(b) {
                stuffed.push(b);
            }
        }
        s.execute_next(pending);

        prop_assert_eq!(s.read_key(), Ok(pending));
        for &b in &stuffed {
            prop_assert_eq!(s.read_key(), Ok(b));
        }
        prop_assert_eq!(s.io().reads, 0);
    }

    #[test]
    fn gather_preserves_source_order(source in prop::collection::vec(any::<u8>(), 0..40)) {
        let input = ScriptedInput::bytes(&source).with_queue_report();
        let mut s: InputSession<_, NoHooks, NoSignals, CAP> =
            InputSession::new(input, NoHooks, NoSignals);

        let stuffed = s.gather_typeahead().unwrap();
        prop_assert!(stuffed <= CAP - 1);
        prop_assert!(stuffed <= source.len());
        prop_assert!(s.state().typeahead().iter().eq(source[..stuffed].iter()));

        // Gathering stops right after the first line ending
        if let Some(end) = source[..stuffed].iter().position(|&b| b == b'\n' || b == b'\r') {
            prop_assert_eq!(end + 1, stuffed);
        }
    }
}

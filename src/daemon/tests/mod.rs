//! End-to-end tests for the event loop
//!
//! Frames come from memory or a socket pair; the desktop collaborators are
//! recording test doubles.

use crate::actions::ActionDispatcher;
use crate::config::parse_config;
use crate::core::{Event, RotationState, SynthAction};
use crate::daemon::{DaemonContext, EventLoop, LoopSummary};
use crate::desktop::{DesktopError, ProcessRunner, Synthesizer, WindowContextProvider};
use std::cell::{Cell, RefCell};
use std::io::{Cursor, Write};
use std::net::Shutdown;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::rc::Rc;
use std::thread;

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Key(SynthAction, String),
    Run(Vec<String>),
}

#[derive(Clone, Default)]
struct Recorder {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl Recorder {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl Synthesizer for Recorder {
    fn synthesize(&mut self, action: SynthAction, key: &str) -> Result<(), DesktopError> {
        self.calls.borrow_mut().push(Call::Key(action, key.to_string()));
        Ok(())
    }
}

impl ProcessRunner for Recorder {
    fn spawn(&mut self, tokens: &[String]) -> Result<(), DesktopError> {
        self.calls.borrow_mut().push(Call::Run(tokens.to_vec()));
        Ok(())
    }
}

/// Window provider returning a fixed class and counting queries
struct FixedWindow {
    class: Option<String>,
    queries: Rc<Cell<usize>>,
}

impl WindowContextProvider for FixedWindow {
    fn active_window_class(&mut self) -> Option<String> {
        self.queries.set(self.queries.get() + 1);
        self.class.clone()
    }
}

fn context(config: &str) -> DaemonContext {
    DaemonContext::new(parse_config(config).unwrap(), PathBuf::from("/tmp/WacKeys.sock"))
}

/// Helper: runs `frames` through a loop and returns recorded actions
fn run_frames(
    config: &str,
    class: Option<&str>,
    frames: &[u8],
) -> (LoopSummary, Vec<Call>, usize) {
    let context = context(config);
    let recorder = Recorder::default();
    let queries = Rc::new(Cell::new(0));
    let window = FixedWindow {
        class: class.map(str::to_string),
        queries: Rc::clone(&queries),
    };
    let dispatcher = ActionDispatcher::new(Box::new(recorder.clone()), Box::new(recorder.clone()));

    let mut event_loop = EventLoop::new(
        &context,
        Cursor::new(frames.to_vec()),
        Box::new(window),
        dispatcher,
    );
    let summary = event_loop.run().unwrap();

    (summary, recorder.calls(), queries.get())
}

#[test]
fn test_button_press_and_release_without_window() {
    let (summary, calls, _) = run_frames("[default]\nbutton_1 = a\n", None, b"BP000M00BR000M00");

    assert_eq!(summary, LoopSummary { frames: 2, dropped: 0 });
    assert_eq!(
        calls,
        vec![
            Call::Key(SynthAction::Press, "a".to_string()),
            Call::Key(SynthAction::Release, "a".to_string()),
        ]
    );
}

#[test]
fn test_window_class_selects_section() {
    let config = "[default]\nbutton_1 = a\n[krita/layer_2]\nbutton_1 = Control L\n";
    let (_, calls, _) = run_frames(config, Some("krita"), b"BP000M01BP000M00");

    assert_eq!(
        calls,
        vec![
            Call::Key(SynthAction::Press, "ControlL".to_string()),
            Call::Key(SynthAction::Press, "a".to_string()),
        ]
    );
}

#[test]
fn test_unmapped_and_malformed_frames_do_nothing() {
    let (summary, calls, _) = run_frames(
        "[default]\nbutton_1 = a\n",
        None,
        b"BP005M00XX000M00BP1     BR005M00",
    );

    assert_eq!(summary, LoopSummary { frames: 4, dropped: 2 });
    assert!(calls.is_empty());
}

#[test]
fn test_run_command_spawns() {
    let (_, calls, _) = run_frames(
        "[default]\nbutton_3 = run: notify-send hi\n",
        None,
        b"BP002M00",
    );

    assert_eq!(
        calls,
        vec![Call::Run(vec!["notify-send".to_string(), "hi".to_string()])]
    );
}

#[test]
fn test_ring_gesture_taps_once() {
    let config = "[default]\nring_cw = bracketright\nring_ccw = bracketleft\n";
    // 0 -> 5 -> 11 fires once (positive cross product), 12 starts a new gesture
    let (_, calls, queries) = run_frames(config, None, b"RR000M00RR005M00RR011M00RR012M00");

    assert_eq!(calls, vec![Call::Key(SynthAction::Tap, "bracketleft".to_string())]);
    // Window is only consulted when something fires
    assert_eq!(queries, 1);
}

#[test]
fn test_ring_done_cancels_gesture() {
    let config = "[default]\nring_cw = bracketright\nring_ccw = bracketleft\n";
    let (_, calls, _) = run_frames(config, None, b"RR100M00RD100M00RR095M00RR090M00");

    // After RD the start is 95, so 90 is only 5° away
    assert!(calls.is_empty());
}

#[test]
fn test_ring_uses_layer_sections() {
    let config = "[default]\nring_cw = a\n[layer_3]\nring_cw = b\n";
    let (_, calls, _) = run_frames(config, None, b"RR050M02RR030M02");

    assert_eq!(calls, vec![Call::Key(SynthAction::Tap, "b".to_string())]);
}

#[test]
fn test_handle_event_tracks_rotation_state() {
    let context = context("[default]\n");
    let recorder = Recorder::default();
    let dispatcher = ActionDispatcher::new(Box::new(recorder.clone()), Box::new(recorder));
    let window = FixedWindow {
        class: None,
        queries: Rc::new(Cell::new(0)),
    };
    let mut event_loop =
        EventLoop::new(&context, Cursor::new(Vec::new()), Box::new(window), dispatcher);

    event_loop.handle_event(Event::RingRotate { angle_degrees: 0, layer_index: 0 });
    event_loop.handle_event(Event::RingRotate { angle_degrees: 9, layer_index: 0 });
    assert_eq!(event_loop.rotation_state(), RotationState::Tracking { start_angle: 0 });

    event_loop.handle_event(Event::RingRotateEnd);
    assert_eq!(event_loop.rotation_state(), RotationState::Idle);
}

#[test]
fn test_shutdown_ends_loop_cleanly() {
    let (client, mut driver) = UnixStream::pair().unwrap();
    let shutdown_handle = client.try_clone().unwrap();

    let context = context("[default]\nbutton_1 = a\n");
    let recorder = Recorder::default();
    let dispatcher = ActionDispatcher::new(Box::new(recorder.clone()), Box::new(recorder.clone()));
    let window = FixedWindow {
        class: None,
        queries: Rc::new(Cell::new(0)),
    };

    driver.write_all(b"BP000M00").unwrap();
    let signaller = thread::spawn(move || {
        // Stands in for the Ctrl-C handler
        shutdown_handle.shutdown(Shutdown::Both).unwrap();
    });

    let mut event_loop = EventLoop::new(&context, client, Box::new(window), dispatcher);
    let summary = event_loop.run().unwrap();
    signaller.join().unwrap();

    // The frame may or may not have been read before the shutdown
    assert!(summary.frames <= 1);
    assert_eq!(summary.dropped, 0);
    assert!(recorder.calls().len() <= 1);
}

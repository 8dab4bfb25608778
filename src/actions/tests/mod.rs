use crate::actions::ActionDispatcher;
use crate::core::{ActionSpec, SynthAction};
use crate::desktop::{DesktopError, ProcessRunner, Synthesizer};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Key(SynthAction, String),
    Run(Vec<String>),
}

/// Test double that records calls and optionally fails them
#[derive(Clone, Default)]
struct Recorder {
    calls: Rc<RefCell<Vec<Call>>>,
    fail: bool,
}

impl Synthesizer for Recorder {
    fn synthesize(&mut self, action: SynthAction, key: &str) -> Result<(), DesktopError> {
        self.calls.borrow_mut().push(Call::Key(action, key.to_string()));
        if self.fail {
            return Err(DesktopError::ToolFailed {
                tool: "xdotool".to_string(),
                status: "exit status: 1".to_string(),
            });
        }
        Ok(())
    }
}

impl ProcessRunner for Recorder {
    fn spawn(&mut self, tokens: &[String]) -> Result<(), DesktopError> {
        self.calls.borrow_mut().push(Call::Run(tokens.to_vec()));
        if self.fail {
            return Err(DesktopError::EmptyCommand);
        }
        Ok(())
    }
}

fn dispatcher(recorder: &Recorder) -> ActionDispatcher {
    ActionDispatcher::new(Box::new(recorder.clone()), Box::new(recorder.clone()))
}

#[test]
fn test_key_actions_reach_synthesizer() {
    let recorder = Recorder::default();
    let mut dispatcher = dispatcher(&recorder);
    let key = ActionSpec::KeyAction("ctrl+z".to_string());

    dispatcher.dispatch(Some(&key), SynthAction::Press);
    dispatcher.dispatch(Some(&key), SynthAction::Release);
    dispatcher.dispatch(Some(&key), SynthAction::Tap);

    assert_eq!(
        *recorder.calls.borrow(),
        vec![
            Call::Key(SynthAction::Press, "ctrl+z".to_string()),
            Call::Key(SynthAction::Release, "ctrl+z".to_string()),
            Call::Key(SynthAction::Tap, "ctrl+z".to_string()),
        ]
    );
}

#[test]
fn test_commands_reach_runner() {
    let recorder = Recorder::default();
    let mut dispatcher = dispatcher(&recorder);
    let run = ActionSpec::RunCommand(vec!["notify-send".to_string(), "hi".to_string()]);

    dispatcher.dispatch(Some(&run), SynthAction::Press);

    assert_eq!(
        *recorder.calls.borrow(),
        vec![Call::Run(vec!["notify-send".to_string(), "hi".to_string()])]
    );
}

#[test]
fn test_no_mapping_is_noop() {
    let recorder = Recorder::default();
    let mut dispatcher = dispatcher(&recorder);

    dispatcher.dispatch(None, SynthAction::Press);
    dispatcher.dispatch(Some(&ActionSpec::KeyAction(String::new())), SynthAction::Tap);

    assert!(recorder.calls.borrow().is_empty());
}

#[test]
fn test_failures_are_swallowed() {
    let recorder = Recorder {
        fail: true,
        ..Recorder::default()
    };
    let mut dispatcher = dispatcher(&recorder);

    dispatcher.dispatch(Some(&ActionSpec::KeyAction("a".to_string())), SynthAction::Press);
    dispatcher.dispatch(Some(&ActionSpec::RunCommand(Vec::new())), SynthAction::Press);

    // Both attempted exactly once, no retries
    assert_eq!(recorder.calls.borrow().len(), 2);
}

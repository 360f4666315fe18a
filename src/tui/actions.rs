//! Pure action determination for keyboard handling.
//!
//! `determine_action` maps key + context → action with no side effects; the
//! session's `execute_action` performs the mutations and the request.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which part of the screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Sliders,
}

/// User intents, independent of how they are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    InsertChar(char),
    DeleteChar,
    ClearInput,
    /// Fetch, classify and score the identifier in the input.
    ViewResults,
    ToggleFocus,
    SelectPrevious,
    SelectNext,
    /// Move the selected slider by this many units.
    Adjust(i32),
}

/// Minimal state needed to evaluate guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionContext {
    pub focus: Focus,
    /// Whether the identifier input holds any non-blank text.
    pub has_input: bool,
    /// Whether the last request produced sliders.
    pub has_sliders: bool,
}

/// Step used with Shift held.
pub const COARSE_STEP: i32 = 5;

/// Pure function: determine which action a key triggers.
///
/// Returns `None` when the key has no binding or a guard prevents it.
pub fn determine_action(key: KeyEvent, ctx: ActionContext) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('u') if ctx.focus == Focus::Input => Some(Action::ClearInput),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Enter => ctx.has_input.then_some(Action::ViewResults),
        KeyCode::Tab | KeyCode::BackTab => ctx.has_sliders.then_some(Action::ToggleFocus),
        _ => match ctx.focus {
            Focus::Input => input_action(key),
            Focus::Sliders => slider_action(key),
        },
    }
}

fn input_action(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Backspace => Some(Action::DeleteChar),
        KeyCode::Char(c) => Some(Action::InsertChar(c)),
        _ => None,
    }
}

fn slider_action(key: KeyEvent) -> Option<Action> {
    let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
        COARSE_STEP
    } else {
        1
    };
    match key.code {
        KeyCode::Esc => Some(Action::ToggleFocus),
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Adjust(-step)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Adjust(step)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn input_ctx(has_input: bool) -> ActionContext {
        ActionContext {
            focus: Focus::Input,
            has_input,
            has_sliders: false,
        }
    }

    fn slider_ctx() -> ActionContext {
        ActionContext {
            focus: Focus::Sliders,
            has_input: true,
            has_sliders: true,
        }
    }

    #[test]
    fn test_view_results_requires_input() {
        assert_eq!(determine_action(key(KeyCode::Enter), input_ctx(false)), None);
        assert_eq!(
            determine_action(key(KeyCode::Enter), input_ctx(true)),
            Some(Action::ViewResults)
        );
    }

    #[test]
    fn test_letters_are_typed_not_bound() {
        assert_eq!(
            determine_action(key(KeyCode::Char('q')), input_ctx(true)),
            Some(Action::InsertChar('q'))
        );
        assert_eq!(
            determine_action(key(KeyCode::Char('j')), input_ctx(true)),
            Some(Action::InsertChar('j'))
        );
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(determine_action(ctrl_c, input_ctx(false)), Some(Action::Quit));
        assert_eq!(determine_action(ctrl_c, slider_ctx()), Some(Action::Quit));
    }

    #[test]
    fn test_focus_toggle_guarded_by_sliders() {
        assert_eq!(determine_action(key(KeyCode::Tab), input_ctx(true)), None);
        assert_eq!(
            determine_action(key(KeyCode::Tab), slider_ctx()),
            Some(Action::ToggleFocus)
        );
    }

    #[test]
    fn test_slider_keys() {
        let ctx = slider_ctx();
        assert_eq!(
            determine_action(key(KeyCode::Down), ctx),
            Some(Action::SelectNext)
        );
        assert_eq!(
            determine_action(key(KeyCode::Left), ctx),
            Some(Action::Adjust(-1))
        );
        let shifted = KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT);
        assert_eq!(
            determine_action(shifted, ctx),
            Some(Action::Adjust(COARSE_STEP))
        );
        assert_eq!(
            determine_action(key(KeyCode::Esc), ctx),
            Some(Action::ToggleFocus)
        );
    }
}

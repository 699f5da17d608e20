//! The reusable text field row and its binding contract.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rat_focus::FocusFlag;
use tocky_types::form::{FieldPresentation, FormField};

use crate::ui::components::common::TextInputState;

/// Everything a form screen must expose to place one of its fields in a
/// row.
///
/// Concrete view-models live with the form that owns the edited object;
/// rows stay generic over where the value comes from and what editing it
/// ultimately mutates.
pub trait TextFieldRowViewModel {
    fn label(&self) -> &str;
    fn placeholder(&self) -> &str;
    fn presentation(&self) -> FieldPresentation;
    fn value(&self) -> &str;
    fn field(&self) -> FormField;
}

/// Called with the edited field and the full new text after each change.
pub type ChangeAction = Box<dyn FnMut(FormField, String)>;

/// Commit hook for return-key presses.
///
/// The row does not act on return itself: whoever dispatched the event
/// decides whether to move focus, submit, or ignore it. The delegate is
/// passed by reference per dispatch; the row never stores it.
pub trait TextFieldRowDelegate {
    fn text_field_row_did_return(&mut self, row: &mut TextFieldRowState);
}

/// Delegate that records which bound field reported a return press, for
/// callers that resolve chaining after the dispatch completes.
#[derive(Debug, Default)]
pub struct ReturnRecorder {
    pub field: Option<FormField>,
}

impl TextFieldRowDelegate for ReturnRecorder {
    fn text_field_row_did_return(&mut self, row: &mut TextFieldRowState) {
        self.field = row.field();
    }
}

/// Rows do not grow with their content: one label line plus a bordered
/// input line.
pub const PREFERRED_ROW_HEIGHT: u16 = 4;

/// One reusable editable row: a label, a text buffer, and the binding to
/// whichever logical field currently occupies the slot.
///
/// Slots are created once per visual position and rebound as the form
/// recycles them. `bind` replaces the previous binding wholesale; there is
/// no explicit unbind, so a slot must be rebound before it is shown again.
pub struct TextFieldRowState {
    pub f_input: FocusFlag,
    label: String,
    placeholder: String,
    presentation: FieldPresentation,
    input: TextInputState,
    field: Option<FormField>,
    change_action: Option<ChangeAction>,
}

impl fmt::Debug for TextFieldRowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextFieldRowState")
            .field("label", &self.label)
            .field("field", &self.field)
            .field("value", &self.input.text())
            .finish_non_exhaustive()
    }
}

impl TextFieldRowState {
    /// Creates an unbound slot. `name` is the focus node identifier.
    pub fn new(name: &str) -> Self {
        Self {
            f_input: FocusFlag::new().with_name(name),
            label: String::new(),
            placeholder: String::new(),
            presentation: FieldPresentation::default(),
            input: TextInputState::new(),
            field: None,
            change_action: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn presentation(&self) -> FieldPresentation {
        self.presentation
    }

    pub fn text(&self) -> &str {
        self.input.text()
    }

    pub fn input(&self) -> &TextInputState {
        &self.input
    }

    pub fn field(&self) -> Option<FormField> {
        self.field
    }

    pub fn is_bound(&self) -> bool {
        self.field.is_some()
    }

    /// Applies `model` to this slot and arms `change_action` for the edits
    /// that follow. The previous binding, if any, is discarded whole.
    ///
    /// The visible text is replaced only when the model value differs from
    /// what the buffer already shows; a redundant rebind must not move the
    /// caret out from under an edit in progress.
    pub fn bind(&mut self, model: &dyn TextFieldRowViewModel, change_action: ChangeAction) {
        self.label = model.label().to_string();
        self.placeholder = model.placeholder().to_string();
        self.presentation = model.presentation();
        self.input.replace_if_changed(model.value());
        self.field = Some(model.field());
        self.change_action = Some(change_action);
    }

    /// Fixed row height, independent of the bound content.
    pub fn preferred_height(_model: &dyn TextFieldRowViewModel) -> u16 {
        PREFERRED_ROW_HEIGHT
    }

    /// Attempts to take the caret. An unbound slot refuses: it has no
    /// field to attribute input to.
    pub fn focus(&mut self) -> bool {
        if self.field.is_none() {
            return false;
        }
        self.f_input.set(true);
        true
    }

    /// Attempts to give up the caret.
    pub fn unfocus(&mut self) -> bool {
        self.f_input.set(false);
        true
    }

    /// Routes one key into the buffer. Returns whether the row consumed
    /// it.
    ///
    /// Enter is reported to `delegate` and otherwise left alone: the row
    /// neither gives up focus nor inserts anything, so field chaining
    /// stays under the caller's control.
    pub fn handle_key_event(&mut self, key: KeyEvent, delegate: &mut dyn TextFieldRowDelegate) -> bool {
        match key.code {
            KeyCode::Enter => {
                delegate.text_field_row_did_return(self);
                true
            }
            KeyCode::Left => {
                self.input.move_left();
                true
            }
            KeyCode::Right => {
                self.input.move_right();
                true
            }
            KeyCode::Home => {
                self.input.move_to_start();
                true
            }
            KeyCode::End => {
                self.input.move_to_end();
                true
            }
            KeyCode::Backspace => {
                if self.input.backspace() {
                    self.notify_change();
                }
                true
            }
            KeyCode::Delete => {
                if self.input.delete() {
                    self.notify_change();
                }
                true
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.insert_char(c);
                self.notify_change();
                true
            }
            _ => false,
        }
    }

    /// Reports the buffer's current text through the bound change action.
    /// Without a bound field the edit is dropped: an unbound slot is idle,
    /// not broken.
    fn notify_change(&mut self) {
        let Some(field) = self.field else {
            return;
        };
        if let Some(change_action) = self.change_action.as_mut() {
            change_action(field, self.input.text().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tocky_types::form::ReturnKey;

    struct StaticModel {
        value: String,
        field: FormField,
    }

    impl StaticModel {
        fn issuer(value: &str) -> Self {
            Self {
                value: value.to_string(),
                field: FormField::Issuer,
            }
        }
    }

    impl TextFieldRowViewModel for StaticModel {
        fn label(&self) -> &str {
            "Issuer"
        }

        fn placeholder(&self) -> &str {
            "Some Website"
        }

        fn presentation(&self) -> FieldPresentation {
            FieldPresentation::text().with_return_key(ReturnKey::Next)
        }

        fn value(&self) -> &str {
            &self.value
        }

        fn field(&self) -> FormField {
            self.field
        }
    }

    fn recording_change_action(log: &Rc<RefCell<Vec<(FormField, String)>>>) -> ChangeAction {
        let log = Rc::clone(log);
        Box::new(move |field, value| log.borrow_mut().push((field, value)))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn edits_report_the_bound_field_exactly_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut row = TextFieldRowState::new("test.row");
        row.bind(&StaticModel::issuer("12345"), recording_change_action(&log));

        let mut delegate = ReturnRecorder::default();
        row.handle_key_event(key(KeyCode::Char('6')), &mut delegate);

        assert_eq!(log.borrow().as_slice(), &[(FormField::Issuer, "123456".to_string())]);
    }

    #[test]
    fn unbound_edits_are_dropped_without_panicking() {
        let mut row = TextFieldRowState::new("test.row");
        let mut delegate = ReturnRecorder::default();

        assert!(row.handle_key_event(key(KeyCode::Char('x')), &mut delegate));
        assert_eq!(row.text(), "x");
    }

    #[test]
    fn redundant_bind_leaves_the_buffer_alone() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut row = TextFieldRowState::new("test.row");
        row.bind(&StaticModel::issuer("example"), recording_change_action(&log));

        let mut delegate = ReturnRecorder::default();
        row.handle_key_event(key(KeyCode::Left), &mut delegate);
        let cursor = row.input().cursor();

        row.bind(&StaticModel::issuer("example"), recording_change_action(&log));
        assert_eq!(row.input().cursor(), cursor);

        row.bind(&StaticModel::issuer("replaced"), recording_change_action(&log));
        assert_eq!(row.text(), "replaced");
    }

    #[test]
    fn rebinding_replaces_the_previous_binding_wholesale() {
        let first_log = Rc::new(RefCell::new(Vec::new()));
        let second_log = Rc::new(RefCell::new(Vec::new()));
        let mut row = TextFieldRowState::new("test.row");

        row.bind(&StaticModel::issuer(""), recording_change_action(&first_log));
        row.bind(
            &StaticModel {
                value: String::new(),
                field: FormField::Name,
            },
            recording_change_action(&second_log),
        );

        let mut delegate = ReturnRecorder::default();
        row.handle_key_event(key(KeyCode::Char('a')), &mut delegate);

        assert!(first_log.borrow().is_empty());
        assert_eq!(second_log.borrow().as_slice(), &[(FormField::Name, "a".to_string())]);
    }

    #[test]
    fn backspace_on_an_empty_buffer_reports_nothing() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut row = TextFieldRowState::new("test.row");
        row.bind(&StaticModel::issuer(""), recording_change_action(&log));

        let mut delegate = ReturnRecorder::default();
        row.handle_key_event(key(KeyCode::Backspace), &mut delegate);

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn return_notifies_the_delegate_and_keeps_focus() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut row = TextFieldRowState::new("test.row");
        row.bind(&StaticModel::issuer("example"), recording_change_action(&log));
        assert!(row.focus());

        let mut delegate = ReturnRecorder::default();
        row.handle_key_event(key(KeyCode::Enter), &mut delegate);

        assert_eq!(delegate.field, Some(FormField::Issuer));
        assert!(row.f_input.get());
        assert_eq!(row.text(), "example");
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn an_unbound_slot_refuses_focus() {
        let mut row = TextFieldRowState::new("test.row");
        assert!(!row.focus());
        assert!(!row.f_input.get());

        let log = Rc::new(RefCell::new(Vec::new()));
        row.bind(&StaticModel::issuer(""), recording_change_action(&log));
        assert!(row.focus());
        assert!(row.unfocus());
        assert!(!row.f_input.get());
    }

    #[test]
    fn bind_applies_the_model_presentation() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut row = TextFieldRowState::new("test.row");
        row.bind(&StaticModel::issuer(""), recording_change_action(&log));

        assert_eq!(row.label(), "Issuer");
        assert_eq!(row.placeholder(), "Some Website");
        assert_eq!(row.presentation().return_key, ReturnKey::Next);
        assert_eq!(
            TextFieldRowState::preferred_height(&StaticModel::issuer("")),
            PREFERRED_ROW_HEIGHT
        );
    }
}

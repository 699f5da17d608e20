//! Entry screen for adding a new credential.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Result, anyhow};
use crossterm::event::{KeyCode, KeyEvent};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tocky_types::form::{FieldPresentation, FormField, ReturnKey};
use tocky_types::Effect;

use super::state::{ChangeAction, ReturnRecorder, TextFieldRowState, TextFieldRowViewModel};

/// The values being collected, mutated only through the rows' change
/// actions.
#[derive(Debug, Default, Clone)]
struct AddTokenFormData {
    issuer: String,
    name: String,
    secret: String,
}

struct EntryRowModel {
    label: &'static str,
    placeholder: &'static str,
    presentation: FieldPresentation,
    value: String,
    field: FormField,
}

impl TextFieldRowViewModel for EntryRowModel {
    fn label(&self) -> &str {
        self.label
    }

    fn placeholder(&self) -> &str {
        self.placeholder
    }

    fn presentation(&self) -> FieldPresentation {
        self.presentation
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn field(&self) -> FormField {
        self.field
    }
}

/// Three text rows collecting a new credential: issuer, account name, and
/// the secret key.
///
/// The secret row presents masked and untouched by text services. Return
/// chains from issuer through name to secret; return on the secret row commits the
/// collected values upward. Building the credential (and its generator)
/// out of them is the coordinator's business.
#[derive(Debug)]
pub struct AddTokenFormState {
    data: Rc<RefCell<AddTokenFormData>>,
    pending: Rc<RefCell<Vec<(FormField, String)>>>,
    pub issuer_row: TextFieldRowState,
    pub name_row: TextFieldRowState,
    pub secret_row: TextFieldRowState,
    container_focus: FocusFlag,
}

impl Default for AddTokenFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl AddTokenFormState {
    pub fn new() -> Self {
        let mut form = Self {
            data: Rc::new(RefCell::new(AddTokenFormData::default())),
            pending: Rc::new(RefCell::new(Vec::new())),
            issuer_row: TextFieldRowState::new("add_token.issuer"),
            name_row: TextFieldRowState::new("add_token.name"),
            secret_row: TextFieldRowState::new("add_token.secret"),
            container_focus: FocusFlag::named("add_token"),
        };
        form.rebind();
        form.issuer_row.focus();
        form
    }

    pub fn issuer(&self) -> String {
        self.data.borrow().issuer.clone()
    }

    pub fn name(&self) -> String {
        self.data.borrow().name.clone()
    }

    pub fn secret(&self) -> String {
        self.data.borrow().secret.clone()
    }

    /// Rebinds all three rows against the current form data with fresh
    /// change actions.
    pub fn rebind(&mut self) {
        let data = self.data.borrow().clone();
        self.issuer_row.bind(
            &EntryRowModel {
                label: "Issuer",
                placeholder: "Some Website",
                presentation: FieldPresentation::text().with_return_key(ReturnKey::Next),
                value: data.issuer,
                field: FormField::Issuer,
            },
            Self::change_action(&self.data, &self.pending),
        );
        self.name_row.bind(
            &EntryRowModel {
                label: "Account Name",
                placeholder: "user@example.com",
                presentation: FieldPresentation::text().with_return_key(ReturnKey::Next),
                value: data.name,
                field: FormField::Name,
            },
            Self::change_action(&self.data, &self.pending),
        );
        self.secret_row.bind(
            &EntryRowModel {
                label: "Secret Key",
                placeholder: "•••• •••• •••• ••••",
                presentation: FieldPresentation::secret(),
                value: data.secret,
                field: FormField::Secret,
            },
            Self::change_action(&self.data, &self.pending),
        );
    }

    fn change_action(
        data: &Rc<RefCell<AddTokenFormData>>,
        pending: &Rc<RefCell<Vec<(FormField, String)>>>,
    ) -> ChangeAction {
        let data = Rc::clone(data);
        let pending = Rc::clone(pending);
        Box::new(move |field, value| {
            {
                let mut data = data.borrow_mut();
                match field {
                    FormField::Issuer => data.issuer = value.clone(),
                    FormField::Name => data.name = value.clone(),
                    FormField::Secret => data.secret = value.clone(),
                }
            }
            pending.borrow_mut().push((field, value));
        })
    }

    /// Status line for the secret row, rendered under the form.
    pub fn validate_secret_row(&self) -> Result<String> {
        if self.data.borrow().secret.trim().is_empty() {
            return Err(anyhow!("✘ Secret key missing"));
        }
        Ok("✓ Looks good!".to_string())
    }

    /// Routes keys to the focused row. Landed edits are reported as
    /// effects; return walks the chain from issuer through name to secret, and return
    /// on the secret row commits.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Esc {
            return vec![Effect::FormCancelled];
        }

        let mut returned = ReturnRecorder::default();
        if self.issuer_row.f_input.get() {
            self.issuer_row.handle_key_event(key, &mut returned);
        } else if self.name_row.f_input.get() {
            self.name_row.handle_key_event(key, &mut returned);
        } else if self.secret_row.f_input.get() {
            self.secret_row.handle_key_event(key, &mut returned);
        }

        let mut effects: Vec<Effect> = self
            .pending
            .borrow_mut()
            .drain(..)
            .map(|(field, value)| Effect::FieldEdited(field, value))
            .collect();

        match returned.field {
            Some(FormField::Issuer) => {
                self.issuer_row.unfocus();
                self.name_row.focus();
            }
            Some(FormField::Name) => {
                self.name_row.unfocus();
                self.secret_row.focus();
            }
            Some(FormField::Secret) => effects.push(self.submit_effect()),
            None => {}
        }
        effects
    }

    fn submit_effect(&self) -> Effect {
        let data = self.data.borrow();
        Effect::CreateToken {
            name: data.name.clone(),
            issuer: data.issuer.clone(),
            secret: data.secret.clone(),
        }
    }
}

impl HasFocus for AddTokenFormState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.issuer_row.f_input);
        builder.leaf_widget(&self.name_row.f_input);
        builder.leaf_widget(&self.secret_row.f_input);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tocky_types::form::KeyboardKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut AddTokenFormState, text: &str) {
        for c in text.chars() {
            form.handle_key_event(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn return_walks_the_field_chain_and_commits() {
        let mut form = AddTokenFormState::new();

        type_text(&mut form, "Example");
        form.handle_key_event(key(KeyCode::Enter));
        type_text(&mut form, "alice");
        form.handle_key_event(key(KeyCode::Enter));
        type_text(&mut form, "JBSWY3DP");

        let effects = form.handle_key_event(key(KeyCode::Enter));
        assert_eq!(
            effects,
            vec![Effect::CreateToken {
                name: "alice".into(),
                issuer: "Example".into(),
                secret: "JBSWY3DP".into(),
            }]
        );
    }

    #[test]
    fn the_secret_row_presents_masked() {
        let form = AddTokenFormState::new();
        assert_eq!(form.secret_row.presentation().keyboard, KeyboardKind::Secret);
        assert!(!form.secret_row.presentation().autocorrection);
    }

    #[test]
    fn secret_status_tracks_the_buffer() {
        let mut form = AddTokenFormState::new();
        assert!(form.validate_secret_row().is_err());

        form.handle_key_event(key(KeyCode::Enter));
        form.handle_key_event(key(KeyCode::Enter));
        type_text(&mut form, "JBSWY3DP");
        assert_eq!(form.validate_secret_row().unwrap(), "✓ Looks good!");
    }

    #[test]
    fn edits_stay_attributed_to_their_field() {
        let mut form = AddTokenFormState::new();

        type_text(&mut form, "Example");
        form.handle_key_event(key(KeyCode::Enter));
        let effects = form.handle_key_event(key(KeyCode::Char('a')));

        assert_eq!(effects, vec![Effect::FieldEdited(FormField::Name, "a".into())]);
        assert_eq!(form.issuer(), "Example");
        assert_eq!(form.name(), "a");
        assert_eq!(form.secret(), "");
    }
}

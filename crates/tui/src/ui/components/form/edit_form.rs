//! Edit screen for an existing credential's display fields.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tocky_types::form::{FieldPresentation, FormField, ReturnKey};
use tocky_types::{Effect, TokenRef};

use super::state::{ChangeAction, ReturnRecorder, TextFieldRowState, TextFieldRowViewModel};

/// The values being edited, mutated only through the rows' change actions.
#[derive(Debug, Default, Clone)]
struct EditTokenFormData {
    issuer: String,
    name: String,
}

struct IssuerRowModel {
    value: String,
}

impl TextFieldRowViewModel for IssuerRowModel {
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
        FormField::Issuer
    }
}

struct NameRowModel {
    value: String,
}

impl TextFieldRowViewModel for NameRowModel {
    fn label(&self) -> &str {
        "Account Name"
    }

    fn placeholder(&self) -> &str {
        "user@example.com"
    }

    fn presentation(&self) -> FieldPresentation {
        FieldPresentation::text().with_return_key(ReturnKey::Done)
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn field(&self) -> FormField {
        FormField::Name
    }
}

/// Two text rows bound over one stored credential.
///
/// Edits accumulate in the shared form data through the rows' change
/// actions and are reported upward as they land; submission reports the
/// whole edited value set and leaves the store mutation to the
/// coordinator.
#[derive(Debug)]
pub struct EditTokenFormState {
    token: TokenRef,
    data: Rc<RefCell<EditTokenFormData>>,
    pending: Rc<RefCell<Vec<(FormField, String)>>>,
    pub issuer_row: TextFieldRowState,
    pub name_row: TextFieldRowState,
    container_focus: FocusFlag,
}

impl EditTokenFormState {
    pub fn new(token: TokenRef) -> Self {
        let data = Rc::new(RefCell::new(EditTokenFormData {
            issuer: token.token.issuer.clone(),
            name: token.token.name.clone(),
        }));
        let mut form = Self {
            token,
            data,
            pending: Rc::new(RefCell::new(Vec::new())),
            issuer_row: TextFieldRowState::new("edit_token.issuer"),
            name_row: TextFieldRowState::new("edit_token.name"),
            container_focus: FocusFlag::named("edit_token"),
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

    /// Rebinds both rows against the current form data with fresh change
    /// actions. Runs at construction and whenever a slot is recycled.
    pub fn rebind(&mut self) {
        let issuer_model = IssuerRowModel {
            value: self.data.borrow().issuer.clone(),
        };
        self.issuer_row
            .bind(&issuer_model, Self::change_action(&self.data, &self.pending));

        let name_model = NameRowModel {
            value: self.data.borrow().name.clone(),
        };
        self.name_row
            .bind(&name_model, Self::change_action(&self.data, &self.pending));
    }

    fn change_action(
        data: &Rc<RefCell<EditTokenFormData>>,
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
                    FormField::Secret => {}
                }
            }
            pending.borrow_mut().push((field, value));
        })
    }

    /// Routes keys to the focused row. Landed edits are reported as
    /// effects; return moves the caret from the issuer row to the name row,
    /// and return on the last row submits.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Esc {
            return vec![Effect::FormCancelled];
        }

        let mut returned = ReturnRecorder::default();
        if self.issuer_row.f_input.get() {
            self.issuer_row.handle_key_event(key, &mut returned);
        } else if self.name_row.f_input.get() {
            self.name_row.handle_key_event(key, &mut returned);
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
            Some(_) => effects.push(self.submit_effect()),
            None => {}
        }
        effects
    }

    fn submit_effect(&self) -> Effect {
        let data = self.data.borrow();
        Effect::SaveTokenEdits {
            token: Arc::clone(&self.token),
            name: data.name.clone(),
            issuer: data.issuer.clone(),
        }
    }
}

impl HasFocus for EditTokenFormState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.issuer_row.f_input);
        builder.leaf_widget(&self.name_row.f_input);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

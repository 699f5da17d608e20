mod edit_form;
mod entry_form;
mod form_view;
mod state;

pub use edit_form::EditTokenFormState;
pub use entry_form::AddTokenFormState;
pub use form_view::{render_add_token_form, render_edit_token_form, render_text_field_row};
pub use state::{
    ChangeAction, PREFERRED_ROW_HEIGHT, ReturnRecorder, TextFieldRowDelegate, TextFieldRowState,
    TextFieldRowViewModel,
};

//! Form field descriptors shared between form screens and their rows.
//!
//! A row never knows which form it sits in; it carries a [`FormField`]
//! discriminant so change notifications stay attributable, and a
//! [`FieldPresentation`] so the renderer can apply input affordances
//! without the row hard-coding them.

use serde::{Deserialize, Serialize};

/// Identifies which logical form field a row currently edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormField {
    Issuer,
    Name,
    Secret,
}

/// Input affordances a renderer applies to a text field row.
///
/// These are hints, not behavior: the row carries them so the renderer can
/// mask secret material, label the return key in the hint bar, and decide
/// whether text services (correction, capitalization) may touch the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPresentation {
    pub keyboard: KeyboardKind,
    pub autocapitalization: Autocapitalization,
    pub autocorrection: bool,
    pub return_key: ReturnKey,
}

impl Default for FieldPresentation {
    fn default() -> Self {
        Self::text()
    }
}

impl FieldPresentation {
    /// Hints for free-form label text (issuer and account names).
    pub fn text() -> Self {
        Self {
            keyboard: KeyboardKind::Text,
            autocapitalization: Autocapitalization::Words,
            autocorrection: true,
            return_key: ReturnKey::Done,
        }
    }

    /// Hints for secret key material: masked, untouched by text services.
    pub fn secret() -> Self {
        Self {
            keyboard: KeyboardKind::Secret,
            autocapitalization: Autocapitalization::None,
            autocorrection: false,
            return_key: ReturnKey::Done,
        }
    }

    pub fn with_return_key(mut self, return_key: ReturnKey) -> Self {
        self.return_key = return_key;
        self
    }
}

/// Which rendering treatment the field's text gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyboardKind {
    Text,
    Secret,
}

/// Capitalization treatment a text service may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Autocapitalization {
    None,
    Words,
    Sentences,
}

/// What pressing return means while the field is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnKey {
    Next,
    Done,
}

impl ReturnKey {
    /// Label shown in the hint bar while the row is focused.
    pub fn hint_label(&self) -> &'static str {
        match self {
            ReturnKey::Next => "Next field",
            ReturnKey::Done => "Done",
        }
    }
}

//! Render-ready projection of stored credentials.

use std::sync::Arc;

use tocky_types::{DisplayTime, TokenAction, TokenRef};
use tracing::debug;

/// One list row: display labels, the live password, and the actions
/// available on the credential.
///
/// Rows are rebuilt from the store on every refresh tick and compared by
/// value so unchanged rows can skip re-rendering. The store identifier
/// rides along so diffing can tell "same credential, new password" from
/// "different credential"; it is never derived from the display fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRow {
    pub name: String,
    pub issuer: String,
    pub password: String,
    pub shows_button: bool,
    pub button_action: TokenAction,
    pub select_action: TokenAction,
    pub edit_action: TokenAction,
    pub delete_action: TokenAction,
    identifier: Vec<u8>,
}

impl TokenRow {
    /// Projects `persistent_token` as it should display at `display_time`.
    ///
    /// Projection never fails: a generator error degrades the password to
    /// an empty string after the typed error is logged. The actions carry
    /// data only; firing them is the coordinator's business.
    pub fn new(persistent_token: &TokenRef, display_time: DisplayTime) -> Self {
        let token = &persistent_token.token;
        let password = match token.generator.password_at_time(display_time.unix_time()) {
            Ok(password) => password,
            Err(error) => {
                debug!(%error, name = %token.name, "password generation failed");
                String::new()
            }
        };
        Self {
            name: token.name.clone(),
            issuer: token.issuer.clone(),
            shows_button: token.generator.factor().is_counter_based(),
            button_action: TokenAction::UpdatePersistentToken(Arc::clone(persistent_token)),
            select_action: TokenAction::CopyPassword(password.clone()),
            edit_action: TokenAction::EditPersistentToken(Arc::clone(persistent_token)),
            delete_action: TokenAction::DeletePersistentToken(Arc::clone(persistent_token)),
            identifier: persistent_token.identifier.clone(),
            password,
        }
    }

    /// Whether `other` projects the same stored credential, regardless of
    /// what either row currently displays.
    pub fn has_same_identity(&self, other: &TokenRow) -> bool {
        self.identifier == other.identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::tokens::testing::{
        FailingGenerator, ScriptedGenerator, counter_token, display_time, timer_token,
    };

    #[test]
    fn projection_is_deterministic() {
        let token = counter_token(&[0xAA], "alice", "Example", "552312");
        let now = display_time(1000);

        assert_eq!(TokenRow::new(&token, now), TokenRow::new(&token, now));
    }

    #[test]
    fn identity_is_stable_while_passwords_change() {
        let generator = ScriptedGenerator::counter().at(1000, "552312").at(1001, "778812");
        let token = generator.into_token(&[0xAA], "alice", "Example");

        let first = TokenRow::new(&token, display_time(1000));
        let second = TokenRow::new(&token, display_time(1001));

        assert!(first.has_same_identity(&second));
        assert_ne!(first.password, second.password);
        assert_ne!(first, second);
    }

    #[test]
    fn counter_tokens_show_the_advance_button() {
        let counter = counter_token(&[1], "a", "A", "111111");
        let timer = timer_token(&[2], "b", "B", "222222");
        let now = display_time(1000);

        assert!(TokenRow::new(&counter, now).shows_button);
        assert!(!TokenRow::new(&timer, now).shows_button);
    }

    #[test]
    fn generation_failure_degrades_to_an_empty_password() {
        let token = FailingGenerator.into_token(&[3], "c", "C");

        let row = TokenRow::new(&token, display_time(1000));

        assert_eq!(row.password, "");
        assert_eq!(row.select_action, TokenAction::CopyPassword(String::new()));
    }

    #[test]
    fn rows_differing_only_in_password_are_not_equal() {
        let generator = ScriptedGenerator::timer().at(1000, "111111").at(1030, "222222");
        let token = generator.into_token(&[4], "d", "D");

        let first = TokenRow::new(&token, display_time(1000));
        let second = TokenRow::new(&token, display_time(1030));

        assert!(first.has_same_identity(&second));
        assert_ne!(first, second);
    }

    #[test]
    fn rows_differing_only_in_identity_are_not_equal() {
        let first = TokenRow::new(&counter_token(&[5], "e", "E", "333333"), display_time(1000));
        let second = TokenRow::new(&counter_token(&[6], "e", "E", "333333"), display_time(1000));

        assert_eq!(first.name, second.name);
        assert_eq!(first.password, second.password);
        assert!(!first.has_same_identity(&second));
        assert_ne!(first, second);
    }

    #[test]
    fn full_projection_of_a_counter_credential() {
        let generator = ScriptedGenerator::counter().at(1000, "552312").at(1001, "778812");
        let token = generator.into_token(&[0xAA], "Alice", "Example");

        let row = TokenRow::new(&token, display_time(1000));
        assert_eq!(row.name, "Alice");
        assert_eq!(row.issuer, "Example");
        assert_eq!(row.password, "552312");
        assert!(row.shows_button);
        assert_eq!(row.select_action, TokenAction::CopyPassword("552312".into()));
        assert_eq!(row.button_action, TokenAction::UpdatePersistentToken(token.clone()));
        assert_eq!(row.edit_action, TokenAction::EditPersistentToken(token.clone()));
        assert_eq!(row.delete_action, TokenAction::DeletePersistentToken(token.clone()));

        let later = TokenRow::new(&token, display_time(1001));
        assert!(row.has_same_identity(&later));
        assert_eq!(later.password, "778812");
        assert_eq!(later.select_action, TokenAction::CopyPassword("778812".into()));
        assert_eq!(later.name, row.name);
        assert_eq!(later.issuer, row.issuer);
        assert_eq!(later.shows_button, row.shows_button);
    }
}

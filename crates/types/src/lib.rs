//! Shared type definitions for the tocky one-time-password manager.
//!
//! This crate carries the domain vocabulary the presentation layer speaks:
//! stored credentials and the opaque generator interface behind them, the
//! externally-sampled display time, the action/effect values components
//! report upward, and the form field descriptors editable rows bind to.
//! It has no UI dependencies and performs no storage or crypto itself.

pub mod form;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use form::{Autocapitalization, FieldPresentation, FormField, KeyboardKind, ReturnKey};

/// Wall-clock instant the refresh driver sampled for the current tick.
///
/// The presentation layer never reads the clock itself. One instant is
/// sampled per refresh and handed to every projection, which keeps a whole
/// tick internally consistent and makes projections reproducible in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DisplayTime(DateTime<Utc>);

impl DisplayTime {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Seconds since the Unix epoch, the representation generators consume.
    pub fn unix_time(&self) -> i64 {
        self.0.timestamp()
    }
}

impl From<DateTime<Utc>> for DisplayTime {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

/// How a generator advances to its next password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Factor {
    /// Manual advance; the moving factor is an invocation counter the user
    /// bumps explicitly.
    Counter(u64),
    /// Time-based advance with a fixed period.
    Timer { period: Duration },
}

impl Factor {
    /// Whether advancing requires an explicit user action.
    pub fn is_counter_based(&self) -> bool {
        matches!(self, Factor::Counter(_))
    }
}

/// Errors surfaced by password generators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("secret is not valid key material")]
    InvalidSecret,
    #[error("unsupported HMAC algorithm")]
    UnsupportedAlgorithm,
    #[error("time {0} is outside the generator's valid range")]
    InvalidTime(i64),
}

/// The one-time-password algorithm behind a stored credential.
///
/// Implementations live with the credential store; this workspace only
/// consumes the interface and treats the algorithm as opaque.
pub trait OtpGenerator: fmt::Debug + Send + Sync {
    /// The advance mechanism backing this generator.
    fn factor(&self) -> Factor;

    /// Derives the password for `unix_time` seconds since the epoch.
    fn password_at_time(&self, unix_time: i64) -> Result<String, GenerationError>;
}

/// Display metadata and generator for one credential.
#[derive(Debug, Clone)]
pub struct Token {
    pub name: String,
    pub issuer: String,
    pub generator: Arc<dyn OtpGenerator>,
}

/// A credential as the store holds it: a [`Token`] plus the stable
/// identifier assigned when it was persisted.
///
/// The identifier is opaque bytes owned by the store. It never changes over
/// the credential's lifetime and is never derived from the display fields,
/// which is what lets diffing tell "same credential, new values" from
/// "different credential".
#[derive(Debug, Clone)]
pub struct PersistentToken {
    pub identifier: Vec<u8>,
    pub token: Token,
}

/// Shared handle to a stored credential, cheap to carry inside actions.
pub type TokenRef = Arc<PersistentToken>;

/// A domain mutation described as data.
///
/// Rows describe what would change if the user acted; the coordinator that
/// owns the store interprets these into actual mutations. Nothing in this
/// workspace performs the mutation itself.
#[derive(Debug, Clone)]
pub enum TokenAction {
    /// Advance a counter-based credential and persist the new moving factor.
    UpdatePersistentToken(TokenRef),
    /// Copy an already-computed password to the clipboard.
    CopyPassword(String),
    /// Open the edit form for a credential.
    EditPersistentToken(TokenRef),
    /// Remove a credential from the store.
    DeletePersistentToken(TokenRef),
}

impl PartialEq for TokenAction {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UpdatePersistentToken(a), Self::UpdatePersistentToken(b))
            | (Self::EditPersistentToken(a), Self::EditPersistentToken(b))
            | (Self::DeletePersistentToken(a), Self::DeletePersistentToken(b)) => {
                a.identifier == b.identifier
            }
            (Self::CopyPassword(a), Self::CopyPassword(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for TokenAction {}

/// Requests components report upward to the mutation coordinator.
#[derive(Debug, Clone)]
pub enum Effect {
    /// A row-level action was requested (copy, edit, delete, advance).
    ActionRequested(TokenAction),
    /// An editable field changed to the given text.
    FieldEdited(FormField, String),
    /// The edit form committed its pending changes.
    SaveTokenEdits {
        token: TokenRef,
        name: String,
        issuer: String,
    },
    /// The entry form committed a new credential.
    CreateToken {
        name: String,
        issuer: String,
        secret: String,
    },
    /// A form was dismissed without committing.
    FormCancelled,
}

impl PartialEq for Effect {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ActionRequested(a), Self::ActionRequested(b)) => a == b,
            (Self::FieldEdited(field_a, text_a), Self::FieldEdited(field_b, text_b)) => {
                field_a == field_b && text_a == text_b
            }
            (
                Self::SaveTokenEdits {
                    token: token_a,
                    name: name_a,
                    issuer: issuer_a,
                },
                Self::SaveTokenEdits {
                    token: token_b,
                    name: name_b,
                    issuer: issuer_b,
                },
            ) => token_a.identifier == token_b.identifier && name_a == name_b && issuer_a == issuer_b,
            (
                Self::CreateToken {
                    name: name_a,
                    issuer: issuer_a,
                    secret: secret_a,
                },
                Self::CreateToken {
                    name: name_b,
                    issuer: issuer_b,
                    secret: secret_b,
                },
            ) => name_a == name_b && issuer_a == issuer_b && secret_a == secret_b,
            (Self::FormCancelled, Self::FormCancelled) => true,
            _ => false,
        }
    }
}

impl Eq for Effect {}

//! # Tocky TUI Library
//!
//! Terminal presentation layer for the tocky one-time-password manager.
//! It turns stored credentials into renderable list rows with live
//! passwords, and binds editable text rows to the logical form fields they
//! mutate.
//!
//! ## Architecture
//!
//! The crate follows a component-based layout: each UI area (the token
//! list, the credential forms) keeps its state in a `state`/`row` module
//! and its drawing in a sibling view module. Components never touch the
//! credential store; they report [`tocky_types::Effect`] values upward and
//! the enclosing application reduces them into mutations.
//!
//! The event loop, terminal setup, and the store itself live with the
//! embedding application, not here.

pub mod ui;

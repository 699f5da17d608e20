//! UI components for the tocky presentation layer.

pub mod components;

//! Mindful Twin - a simulated mental-wellness companion
//!
//! A keyword-driven dialogue engine and a timer-driven guided exercise
//! session, with the dashboard counters, notifications and voice input that
//! surround them.

pub mod companion;
pub mod config;
pub mod dialogue;
pub mod notifications;
pub mod runtime;
pub mod session;
pub mod voice;
pub mod wellness;

pub use companion::{accept_message, Companion, DelayedMessage, Exchange, Update};
pub use config::TwinConfig;

//! # honeypot_dashboard
//!
//! `honeypot_dashboard` prints the attack events honeypot agents record in
//! Cloud Firestore as a terminal table.
//!
//! ## Modules
//!
//! - `access`: The data access layer (`list_events`, `create_event`).
//! - `app`: Store construction and the one-shot dashboard run.
//! - `cli`: Command line arguments.
//! - `config`: Configuration management.
//! - `controller`: Cancellable fetch-on-mount state machine.
//! - `domain`: Core domain types.
//! - `storage`: Pluggable store trait with Firestore and in-memory backends.
//! - `ui`: Table rendering and timestamp formatting.

pub mod access;
pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
pub mod domain;
pub mod storage;
pub mod ui;

// MailTriage - app/mod.rs
//
// Application layer: request orchestration and state management.
// Dependencies: core layer, HTTP client.
// Must NOT depend on: ui, platform specifics.

pub mod classify;
pub mod health;
pub mod state;

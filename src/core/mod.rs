// MailTriage - core/mod.rs
//
// Core domain layer: wire types, drafts, and validation.
// Must NOT depend on: ui, app, platform, or the HTTP client.

pub mod draft;
pub mod model;

// MailTriage - ui/panels/mod.rs

pub mod about;
pub mod alert;
pub mod compose;
pub mod result;
pub mod upload;

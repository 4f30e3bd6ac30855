//! Orchestration between the HTTP surface and the store: input validation,
//! dispatch, and mapping store sentinels to user-facing outcomes.

pub mod admin;
pub mod booking;

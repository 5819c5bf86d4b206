//! Base types and error handling.
//!
//! Provides foundational types mirroring Chromium's `net/base/`:
//! - [`NetError`](neterror::NetError): the crate-wide error type
//! - [`LoadState`](loadstate::LoadState): dispatch progress states

pub mod context;
pub mod loadstate;
pub mod neterror;

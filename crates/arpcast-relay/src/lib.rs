//! arpcast-relay library entry point.
//!
//! Re-exports all public modules so that the binary entry point in
//! `main.rs` and unit tests share the same module tree.

pub mod application;
pub mod infrastructure;

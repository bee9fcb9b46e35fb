//! Core types and trait definitions for the vitrine portfolio backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod contact;
pub mod mailer;
pub mod portfolio;
pub mod store;
pub mod validate;

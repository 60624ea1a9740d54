//! Command implementations for the CLI
//!
//! - quote: price a job and print the breakdown
//! - submit: price a draft and create the estimate on the backend
//! - codes: list the charge-code table
//! - config: configuration display and validation

pub mod codes;
pub mod config;
pub mod quote;
pub mod submit;

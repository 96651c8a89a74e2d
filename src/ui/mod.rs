//! User interface module - terminal output for the command line front-end.
//!
//! Status and errors go to stderr so stdout carries only the version.

pub mod formatter;

pub use formatter::{
    display_error, display_fallback_notice, display_status, display_version,
    format_version_details,
};

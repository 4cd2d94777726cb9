//! Core library for the aws-contacts-manager command line application.
//!
//! The library batch-manages the contact metadata of the accounts in an AWS
//! Organization. Remote services sit behind [`backend::ContactsBackend`],
//! account selection lives in [`accounts`], one function per contact type and
//! action in [`operations`], the organization-wide spreadsheet in [`report`],
//! and the interactive menus in [`shell`].

pub mod accounts;
pub mod backend;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod operations;
pub mod prompt;
pub mod report;
pub mod shell;
pub mod style;

pub use error::{ManagerError, RemoteError, Result};

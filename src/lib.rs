//! # Packit Core Library
//!
//! This crate contains the building blocks of the `packit` tool – a CLI for
//! scaffolding bot packages and publishing them to your dashboard account.
//!
//! `packit` flattens a project's source tree into a single uploadable
//! artifact and stores it in a per-user namespace of the backend document
//! store, keyed by the package's name and version.
//!
//! This library is built for the `packit` CLI, but you can also reuse it as a
//! backend in other tools.
//!
//! ## Modules Overview
//! - [`auth`] – Local credential record and per-invocation authentication
//! - [`client`] – HTTP client for the identity service and package store
//! - [`flatten`] – Flattening a project tree into one delimited artifact
//! - [`key`] – The `name<version>` record-key encoding
//! - [`manifest`] – Reading and validating the local `package.json`
//! - [`template`] – Scaffolding new packages from installed templates
//! - [`error`] – The failure kinds surfaced by the workflows
//! - [`util`] – Shared utilities (well-known paths, prompts)

pub mod auth;
pub mod client;
pub mod error;
pub mod flatten;
pub mod key;
pub mod manifest;
pub mod template;
pub mod util;

pub use auth::*;
pub use client::*;
pub use error::*;
pub use flatten::*;
pub use key::*;
pub use manifest::*;
pub use template::*;
pub use util::*;

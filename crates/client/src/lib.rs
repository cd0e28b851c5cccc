//! Client code for urlfetch.
//!
//! This crate provides the reqwest-backed [`FetchClient`] that the worker
//! pool uses through the [`urlfetch_core::Fetch`] trait.

pub mod fetch;

pub use fetch::{FetchClient, FetchConfig, UrlError, parse_target};

//! Orderdesk API library.
//!
//! This crate provides the HTTP service as a library, allowing the router
//! and repositories to be exercised from tests and from the binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;

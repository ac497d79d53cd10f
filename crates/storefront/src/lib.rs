//! Kasanje storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod ai;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod firestore;
pub mod listing;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

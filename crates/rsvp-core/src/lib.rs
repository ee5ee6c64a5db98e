//! Core types and trait definitions for the wedding RSVP backend.
//!
//! This crate is free of HTTP and database dependencies. It holds the record
//! model, the storage-key scheme, the [`RecordStore`](store::RecordStore)
//! abstraction, the response service that validates and persists submissions,
//! and the pure view aggregator used by the admin dashboard.

// Native `async fn` in traits; futures are bounded `Send` explicitly.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod key;
pub mod record;
pub mod service;
pub mod store;
pub mod view;

pub use error::{Error, Result};

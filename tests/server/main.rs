//! HTTP server integration tests.
//!
//! Starts the router on an ephemeral port and exercises it with reqwest.

#![cfg(feature = "http")]

mod support;
mod routes;

//! Backend for the trap party game.
//!
//! Guest sessions ride on a JWT cookie pair issued by [`auth`]; rooms,
//! case actions, and the SSE state streams are contract stubs behind the
//! same envelope. [`http::app`] assembles the router for both the binary
//! and the integration tests.

pub mod auth;
pub mod config;
pub mod domain;
pub mod http;
pub mod realtime;
pub mod store;
pub mod telemetry;

pub use http::{app, AppState};

//! Server-push channel: snapshot schemas and the SSE endpoints.

pub mod snapshot;
pub mod sse;

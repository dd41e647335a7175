//! Integration tests for the HTTP transport and session over a real socket
//!
//! These tests drive `HttpTransport`, the session and the `testra` commands
//! against a scripted loopback server and check both the requests sent and
//! how responses are interpreted.

pub mod commands;
pub mod helpers;
pub mod http_session;

//! Client for the OpenLinkHub backend service.
//!
//! One poll is one `GET /api/systray` with a fixed timeout, decoded into a
//! [`SystrayResponse`](linkhub_protocol::SystrayResponse).

pub mod client;

pub use client::{BackendError, Client, StatusSource};

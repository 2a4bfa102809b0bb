//! Results endpoint integration tests.

mod support;
mod gateway;
mod retention;

#[cfg(feature = "http")]
mod http;

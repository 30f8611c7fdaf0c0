//! Archive date dialog integration tests.

mod confirm;
mod scenarios;

#[cfg(feature = "http")]
mod http;

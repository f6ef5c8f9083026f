//! Directory listing contracts, wire decoding, and shared listing types.

pub mod reply;
pub mod service;
pub mod types;

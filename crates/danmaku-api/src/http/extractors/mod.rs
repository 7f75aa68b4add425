//! Request extractors.

pub mod client_ip;

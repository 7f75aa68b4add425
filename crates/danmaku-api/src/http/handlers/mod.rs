//! HTTP handlers.

pub mod danmaku;

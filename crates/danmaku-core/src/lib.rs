//! Business logic for the danmaku service.
//!
//! Defines the collaborator traits (comment repository, rate-limit store,
//! token validator) and the [`service::danmaku::DanmakuService`] pipeline
//! that is generic over them. Concrete implementations live in danmaku-infra.

pub mod auth;
pub mod ratelimit;
pub mod repository;
pub mod sanitize;
pub mod service;

//! Services implementing the request pipelines over the collaborator traits.

pub mod danmaku;

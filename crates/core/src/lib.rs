//! StudyPath Core — Resilient Content Acquisition
//!
//! This library obtains generated educational content (quiz question sets,
//! learning path step sequences) from an external generation service and
//! guarantees the caller a well-typed, usable result no matter how the
//! remote behaves. A request flows through topic normalization, a ladder
//! of request-shape strategies, media-kind classification, and result
//! assembly; anything unusable degrades to deterministic content from the
//! built-in catalog.
//!
//! The entry point is [`client::ContentClient`] with its two operations,
//! `acquire_quiz` and `acquire_learning_path`. Neither can fail.

pub mod catalog;
pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod fallback;
pub mod models;
pub mod strategy;
pub mod topic;
pub mod transport;

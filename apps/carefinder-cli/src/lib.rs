//! carefinder-cli
//!
//! Presentation layer over the discovery engine: turns flags into criteria,
//! renders results as text or JSON, and hands user actions to an intent sink.
pub mod args;
pub mod render;
pub mod run;
pub mod sink;

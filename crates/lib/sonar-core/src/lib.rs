//! Core request-shaping and dispatch logic for sonar-mcp.
//!
//! This crate owns everything between a named tool call and the Perplexity
//! chat-completions endpoint: the fixed tool catalog, prompt composition,
//! the upstream client, and the control plane that runs one invocation
//! end-to-end and renders failures in-band.

pub mod catalog;
pub mod client;
pub mod compose;
pub mod control;

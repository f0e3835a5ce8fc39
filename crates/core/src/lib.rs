//! # Wayfinder Core
//!
//! Domain types, traits, and error definitions for the Wayfinder
//! travel-assistant agent. This crate has **zero framework
//! dependencies** — it defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem is defined as a trait here. Implementations live in
//! their respective crates. This enables:
//! - Swapping the LLM backend via configuration
//! - Easy testing with scripted mock providers and stub tools
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod message;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result, ToolError};
pub use message::{ChatMessage, Role};
pub use provider::{ChatProvider, ChatRequest, FragmentStream};
pub use tool::{FnTool, Tool, ToolArgs, ToolRegistry};

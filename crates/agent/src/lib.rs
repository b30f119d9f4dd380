//! Agent runtime - query understanding and tool dispatch
//!
//! This crate is the decision layer of the partdesk assistant. One line of
//! free text goes in, one routed tool result comes out:
//!
//! 1. **Context resolution** (`partdesk_core::context`) - short follow-up
//!    turns are rewritten into explicit queries using the previous turn
//! 2. **Scope + intent** (`partdesk_core::scope`, `partdesk_core::classify`)
//!    - deterministic rules decide whether and what to route
//! 3. **LLM fallback** (`llm`) - an optional external classifier for
//!    queries the rules cannot place
//! 4. **Tool execution** (`tools`, `router`) - the intent-keyed registry
//!    runs one collaborator-backed tool and shapes the reply
//!
//! # Key Types
//!
//! - `ToolRouter` - the `process_query` entry point (see `router`)
//! - `Tool` / `ToolRegistry` - pluggable handlers, one per intent
//! - `LlmClassifier` - trait for the fallback classifier
//!
//! # Determinism Principle
//!
//! Everything up to tool invocation is a pure function of the text and
//! the conversation context. The LLM is only consulted when the rules
//! give up, and its failures never escape the router.

pub mod bootstrap;
pub mod llm;
pub mod router;
pub mod tools;

pub use bootstrap::build_router;
pub use llm::{DeepseekClassifier, LlmClassifier};
pub use router::{DispatchResult, ToolRouter};
pub use tools::{Tool, ToolRegistry};

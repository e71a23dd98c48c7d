//! MCP Common - shared plumbing for MCP servers
//!
//! - **Initialization**: [`init_tracing`] routes logs to stderr so stdout
//!   stays reserved for the protocol
//! - **Results**: helpers for building `CallToolResult` responses
//! - **Errors**: shorthands for MCP-compatible error values
//! - **Embeddable**: [`EmbeddableMcp`] for driving a server in-process
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{json_error, json_success};
//!
//! fn render(outcome: Result<Payload, Failure>) -> Result<CallToolResult, McpError> {
//!     match outcome {
//!         Ok(payload) => json_success(&payload),
//!         Err(failure) => json_error(&failure),
//!     }
//! }
//! ```

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{internal_error, invalid_params, McpResult};
pub use init::init_tracing;
pub use result::{json_error, json_success, text_success};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

pub use async_trait::async_trait;

//! Businessmap MCP Library
//!
//! Exposes the Businessmap (Kanbanize) REST API as MCP tools: boards,
//! columns, lanes, cards, comments, co-owners and subtasks, plus a
//! markdown-lite to HTML formatter used for rich comments. The API key
//! owner is also served as the `user://me` resource.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use businessmap_mcp::{BusinessMapMcpServer, Config};
//!
//! let server = BusinessMapMcpServer::new(Config::load()?)?;
//! // Use with in-memory transport or serve via stdio
//! ```
//!
//! # Configuration
//! Set `BUSINESSMAP_API_URL` and `BUSINESSMAP_API_KEY`, or configure in
//! `~/.config/businessmap-mcp/config.toml`

pub mod api;
pub mod config;
pub mod format;
pub mod handlers;
pub mod params;
pub mod server;
pub mod writer;

// Re-export main server type
pub use server::BusinessMapMcpServer;

pub use api::{ApiError, BusinessMapClient, Envelope, ErrorBody, ErrorKind, RestTransport};
pub use config::Config;
pub use format::{format_content_to_html, format_preserving_existing};
pub use writer::{CommentContent, CommentWriter};

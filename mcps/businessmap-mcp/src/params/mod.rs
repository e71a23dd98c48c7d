//! Parameter types for Businessmap MCP tools
//!
//! Card-scoped tools take camelCase arguments (`cardId`, `commentId`);
//! board, lane, user and workspace tools take snake_case ones.

mod account;
mod board;
mod card;
mod comment;
mod content;
mod lane;
mod subtask;

pub use account::*;
pub use board::*;
pub use card::*;
pub use comment::*;
pub use content::*;
pub use lane::*;
pub use subtask::*;

//! Plain text and lightweight markup to HTML, and back
//!
//! - [`format_content_to_html`] turns raw content into an HTML fragment
//!   for rich-text fields (comments, subtask descriptions)
//! - [`format_preserving_existing`] leaves content that already contains
//!   markup alone
//! - [`html_to_plain_text`] derives the text-only rendition of a fragment
//!
//! Emoji and any other non-ASCII text pass through every stage untouched.

mod html;
mod plain;

pub use html::{format_content_to_html, format_preserving_existing};
pub use plain::{contains_html, html_to_plain_text};

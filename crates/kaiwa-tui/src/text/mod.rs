//! Text rendering utilities.
//!
//! This module holds the markdown rendering pipeline:
//! - [`parse_markdown`] - Parse markdown into [`RenderNode`]s
//! - [`format_cell`] - Resolve table cells into plain or bulleted form
//! - [`render_markdown`], [`render_nodes`] - Lay nodes out as styled ratatui Lines
//! - [`MarkdownStyles`] - Style configuration for markdown elements
//! - [`wrap_text`], [`wrap_line`], [`wrap_verbatim`] - Text wrapping utilities

mod html;
mod lines;
mod markdown;
mod node;
mod styles;
mod table_cell;
mod wrap;

pub use lines::{lines_to_string, render_markdown, render_nodes};
pub use markdown::parse_markdown;
pub use node::{plain_text, Inline, Marks, RenderNode, TableRow};
pub use styles::MarkdownStyles;
pub use table_cell::{format_cell, CellDisplay, TableCell};
pub use wrap::{display_width, wrap_line, wrap_text, wrap_verbatim};

//! Rendering of issues into a Doxygen page built from Markdown tables.

pub mod body;
pub mod document;
pub mod links;
pub mod requirement;
pub mod wrap;

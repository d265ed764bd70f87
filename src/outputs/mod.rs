//! Report renderers.
//!
//! The processor's [`Report`](crate::models::Report) is rendered exactly
//! once, to one of three formats:
//!
//! - [`plain`]: line-oriented text for the terminal (the default)
//! - [`html`]: a single self-contained HTML document
//! - [`json`]: machine-readable output
//!
//! All renderers honor `hide_empty`, which drops stories without videos at
//! render time only; the report itself always keeps them.

pub mod html;
pub mod json;
pub mod plain;

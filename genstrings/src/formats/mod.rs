//! Catalog file formats.
//!
//! Only Apple `.strings` is supported; see [`strings`].

pub mod strings;

pub use strings::{escape_value, render_entry};

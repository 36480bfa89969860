//! Convenience layer for tabular geographic data.
//!
//! Two pieces carry the actual logic: [`registry::CodeRegistry`], a
//! persistent country-name to ISO-3 mapping over a flat hand-editable file,
//! and [`options::partition`], which splits free-form figure options into
//! the construction-time and post-construction sets a plotting collaborator
//! consumes. [`figure::GeoFrame`] ties them together: attach ISO-3 codes to
//! a table, then assemble a [`figure::FigureSpec`] for a
//! [`figure::Renderer`].
//!
//! Everything is synchronous and single-actor; the registry file has no
//! locking discipline and the last writer wins.

pub mod config;
pub mod error;
pub mod figure;
pub mod logging;
pub mod options;
pub mod registry;
pub mod table;

pub use error::{Error, Result};
pub use figure::{FigureKind, FigureSpec, GeoFrame, Renderer};
pub use options::{Options, Partitioned, partition};
pub use registry::CodeRegistry;
pub use table::Table;

//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! - [`viewmodel`]: Display-ready view model types
//! - [`renderer`]: Rendering entry point
//! - [`components`]: Region renderers (header, table, tiles, modal, palette...)
//! - [`helpers`]: Cursor positioning, truncation and highlighting
//! - [`theme`]: Color schemes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{Body, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};

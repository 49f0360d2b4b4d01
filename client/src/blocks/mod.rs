//! Renderers for CMS layout blocks.
//!
//! ARCHITECTURE
//! ============
//! Pages arrive as an ordered list of typed blocks. `content` renders rich
//! text; `table` mounts a live NocoDB grid with row CRUD. `field_renderer`
//! and `attachment` supply the per-column form widgets the table's row
//! editor is assembled from.

pub mod attachment;
pub mod content;
pub mod field_renderer;
pub mod table;

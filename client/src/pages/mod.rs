//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! There are only two routes: the home page (the CMS page with slug `home`)
//! and the catch-all dynamic page for every other slug. Both delegate to
//! [`page::PageView`], which fetches the page document and walks its layout
//! blocks.

pub mod home;
pub mod page;

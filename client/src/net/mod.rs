//! Networking modules for the server's REST proxy.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls and `types` defines the shared wire schema
//! for CMS pages, header navigation, and table descriptors.

pub mod api;
pub mod types;

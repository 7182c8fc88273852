//! Tessera Client - HTTP client for the CKAN action API
//!
//! - [`ckan`] - dataset creation on CKAN open data portals
//!
//! The client handles authentication, request building and response parsing,
//! and implements [`tessera_core::CatalogApi`] so the row processor can use it.

pub mod ckan;

pub use ckan::CkanClient;

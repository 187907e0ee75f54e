//! API client library for cinedeck.
//!
//! Provides the TMDB API client and the vendor-neutral metadata provider
//! abstraction consumed by the search and browse logic.

/// Vendor-neutral metadata provider abstraction.
pub mod provider;

/// TMDB API client.
pub mod tmdb;

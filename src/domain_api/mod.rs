pub mod client;
pub mod models;

pub use client::{DomainClient, DomainError};
pub use models::{LocationFilter, PropertyListing, ResidentialSearchRequest, SearchResult};

//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Admin accounts log in with a username and password and receive a
//! signed token that guards the `/api` routes.

pub mod domain;
pub mod errors;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::{AuthConfig, AuthService};

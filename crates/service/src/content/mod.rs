pub mod repo;
pub mod repository;
pub mod service;
pub mod query;

pub use service::ContentService;
pub use query::ContentQuery;

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;
pub mod transport;

pub use domain::{EmailConfig, EmailVo};
pub use service::EmailService;

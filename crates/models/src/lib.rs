pub mod errors;
pub mod db;
pub mod log;
pub mod login_log;
pub mod email_config;
pub mod qiniu_content;
pub mod admin_user;

#[cfg(test)]
mod tests;

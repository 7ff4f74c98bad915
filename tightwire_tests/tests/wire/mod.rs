pub mod concurrent_sessions;
pub mod sessions;
pub mod truncation;

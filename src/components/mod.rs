pub mod details;
pub mod summary;
pub mod topology;

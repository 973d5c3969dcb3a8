pub mod profile;
pub mod user_directory;

pub mod config;
pub mod estimate;
pub mod extract;
pub mod generate;
pub mod init;
pub mod project;

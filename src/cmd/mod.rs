pub mod config;
pub mod feed;
pub mod output;
pub mod stream;

pub mod config;
pub mod pool;
pub mod score;

mod input;

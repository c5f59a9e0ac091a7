pub mod board;
pub mod grid;
pub mod models;
pub mod services;
pub mod tile;

pub mod console;
pub mod models;

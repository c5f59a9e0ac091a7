pub mod ai;
pub mod console;
pub mod display;

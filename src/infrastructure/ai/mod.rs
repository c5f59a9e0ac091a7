pub mod greedy;
pub mod random;

pub use greedy::GreedyBot;
pub use random::RandomBot;

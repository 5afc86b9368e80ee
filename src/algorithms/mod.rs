pub mod a_star;
pub mod best_first;
pub mod common;
pub mod cost;
pub mod directions;

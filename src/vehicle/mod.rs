pub mod lander;

pub use lander::{Lander, LanderBuilder};

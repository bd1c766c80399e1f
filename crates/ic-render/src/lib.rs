pub mod composite;
pub mod hit;

pub use composite::{Presentation, composite, presentation};
pub use hit::hit_test;

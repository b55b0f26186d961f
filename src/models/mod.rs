mod physician;

pub use physician::*;

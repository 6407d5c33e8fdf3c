pub mod applications;
pub mod ideas;
pub mod me;

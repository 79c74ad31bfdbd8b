pub mod ai;
pub mod extract;
pub mod factory;

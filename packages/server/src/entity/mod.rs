pub mod analysis;
pub mod factory;
pub mod user;

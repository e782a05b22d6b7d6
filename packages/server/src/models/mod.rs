pub mod analysis;
pub mod shared;
pub mod submission;
pub mod verification;

pub mod persistence;
pub mod seed;

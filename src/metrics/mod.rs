pub mod mse;

pub use mse::mse;

pub mod amount;
pub use amount::*;

pub mod decimal;
pub use decimal::*;

pub mod ops;

pub type Address = [u8; 20];

pub mod health;
pub mod tan;

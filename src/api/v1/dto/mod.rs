pub mod tan;

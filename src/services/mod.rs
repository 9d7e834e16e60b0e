pub mod valid_tans;

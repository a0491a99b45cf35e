pub mod day_1;
pub mod day_6;
pub mod day_7;
pub mod day_10;
pub mod day_11;
pub mod day_12;
pub mod day_13;
pub mod day_21;
pub mod day_23;

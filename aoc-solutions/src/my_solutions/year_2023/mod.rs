pub mod day_10;
pub mod day_14;
pub mod day_16;
pub mod day_17;
pub mod day_21;

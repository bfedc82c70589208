pub mod dispatch;
pub mod generate;
pub mod migrate;
pub mod serve;

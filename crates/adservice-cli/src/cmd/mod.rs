pub mod catalog;
pub mod select;
pub mod serve;

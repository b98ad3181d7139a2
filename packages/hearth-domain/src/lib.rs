pub mod filters;
pub mod property;
pub mod query;
pub mod sort;

mod amount;

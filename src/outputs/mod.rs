pub mod page;
pub mod speech;

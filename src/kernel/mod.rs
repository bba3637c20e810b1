pub mod assistant;
pub mod event;
pub mod session;

pub mod capture;
pub mod config;
pub mod console;
pub mod dispatch;
pub mod error;
pub mod kernel;
pub mod outputs;
pub mod prefs;
pub mod services;

pub use dispatch::navigation::match_navigation;
pub use dispatch::responder::respond;
pub use dispatch::Dispatcher;
pub use kernel::assistant::Assistant;

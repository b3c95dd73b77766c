pub mod clock;
pub mod config;
pub mod console;
pub mod export;
pub mod live;
pub mod session;
pub mod store;

mod store_tests;

pub use console::{Console, ConsoleError, TaskRequest};
pub use store::{reduce, DispatchError, Store};

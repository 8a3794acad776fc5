pub mod auction;
pub mod config;
pub mod countdown;
pub mod error;
pub mod handlers;
pub mod merger;
pub mod page;
pub mod sell;
pub mod server;
pub mod store;

pub mod auction;
pub mod bidding;
pub mod database;
pub mod error;
pub mod handlers;
pub mod notification;
pub mod penalty;
pub mod query;
pub mod scheduler;

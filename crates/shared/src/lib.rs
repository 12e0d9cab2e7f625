pub mod config;
pub mod error;
pub mod domain {
    pub mod amount;
    pub mod event;
}
pub mod contracts;
pub mod form;
pub mod repo;
pub mod seed;
pub mod wallet;

pub use config::AppConfig;
pub use error::{ApiError, TicketingError};

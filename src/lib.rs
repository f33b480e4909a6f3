pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpBookingReferenceAdapter, HttpTrainDataAdapter};
pub use config::TomlConfig;
pub use core::allocator::TicketOffice;
pub use domain::model::{Reservation, Seat, TrainSnapshot};
pub use utils::error::{Result, TicketOfficeError};

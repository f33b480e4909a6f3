pub mod allocator;
pub mod coach;
pub mod occupation;

pub use crate::domain::model::{Coach, Reservation, Seat, TrainSnapshot};
pub use crate::domain::ports::{ConfigProvider, ReferenceIssuer, TrainDataProvider};
pub use crate::utils::error::Result;

use crate::domain::model::TrainSnapshot;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Owner of the seat state of every train.
#[async_trait]
pub trait TrainDataProvider: Send + Sync {
    /// `None` when the train is unknown.
    async fn get_train_data(&self, train_id: &str) -> Result<Option<TrainSnapshot>>;

    async fn reserve(
        &self,
        train_id: &str,
        seats: &[String],
        booking_reference: &str,
    ) -> Result<serde_json::Value>;
}

#[async_trait]
pub trait ReferenceIssuer: Send + Sync {
    async fn get_booking_reference(&self) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn train_data_url(&self) -> &str;
    fn booking_reference_url(&self) -> &str;
    fn max_occupation_percentage(&self) -> u8;
    fn request_timeout(&self) -> Duration;
}

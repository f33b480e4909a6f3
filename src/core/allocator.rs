use crate::core::coach::best_coach_empty_seats;
use crate::core::occupation::{Occupation, DEFAULT_MAX_OCCUPATION_PERCENTAGE};
use crate::domain::model::Reservation;
use crate::domain::ports::{ReferenceIssuer, TrainDataProvider};
use crate::utils::error::{Result, TicketOfficeError};

/// Allocates seats for reservation requests.
///
/// Every call works on a freshly fetched snapshot; nothing is cached between
/// calls and nothing prevents two concurrent calls from picking the same seats.
pub struct TicketOffice<T: TrainDataProvider, R: ReferenceIssuer> {
    train_data: T,
    booking_references: R,
    max_occupation_percentage: u8,
}

impl<T: TrainDataProvider, R: ReferenceIssuer> TicketOffice<T, R> {
    pub fn new(train_data: T, booking_references: R) -> Self {
        Self {
            train_data,
            booking_references,
            max_occupation_percentage: DEFAULT_MAX_OCCUPATION_PERCENTAGE,
        }
    }

    pub fn with_max_occupation(mut self, percentage: u8) -> Self {
        self.max_occupation_percentage = percentage;
        self
    }

    pub fn max_occupation_percentage(&self) -> u8 {
        self.max_occupation_percentage
    }

    /// Parses a textual seat count and returns the reservation as JSON.
    pub async fn reserve(&self, train_id: &str, seat_count: &str) -> Result<Option<String>> {
        let seat_count: usize =
            seat_count
                .trim()
                .parse()
                .map_err(|_| TicketOfficeError::InvalidSeatCount {
                    value: seat_count.to_string(),
                })?;

        match self.allocate(train_id, seat_count).await? {
            Some(reservation) => Ok(Some(serde_json::to_string(&reservation)?)),
            None => Ok(None),
        }
    }

    /// `Ok(None)` covers every expected refusal: nothing requested, unknown
    /// train, occupation cap reached, or no single coach with enough room.
    /// Collaborator failures come back as `Err`.
    pub async fn allocate(&self, train_id: &str, seat_count: usize) -> Result<Option<Reservation>> {
        if seat_count == 0 {
            tracing::debug!(train_id, "No seats requested");
            return Ok(None);
        }

        tracing::debug!(train_id, seat_count, "Fetching train data");
        let snapshot = match self.train_data.get_train_data(train_id).await? {
            Some(snapshot) if !snapshot.is_empty() => snapshot,
            _ => {
                tracing::info!(train_id, "Unknown train");
                return Ok(None);
            }
        };

        let occupation =
            Occupation::after_booking(snapshot.len(), snapshot.empty_seat_count(), seat_count);
        if occupation.exceeds(self.max_occupation_percentage) {
            tracing::info!(
                train_id,
                seat_count,
                %occupation,
                limit = self.max_occupation_percentage,
                "Booking would exceed the train occupation limit"
            );
            return Ok(None);
        }

        let Some(coach_seats) = best_coach_empty_seats(&snapshot, seat_count) else {
            tracing::info!(train_id, seat_count, "No coach can take the whole booking");
            return Ok(None);
        };

        let seats: Vec<String> = coach_seats
            .into_iter()
            .take(seat_count)
            .map(str::to_string)
            .collect();

        let booking_reference = self.booking_references.get_booking_reference().await?;
        tracing::debug!(train_id, %booking_reference, "Booking reference issued");

        let acknowledgement = self
            .train_data
            .reserve(train_id, &seats, &booking_reference)
            .await?;
        tracing::debug!(train_id, %acknowledgement, "Situation after reservation");

        tracing::info!(
            train_id,
            seats = ?seats,
            %booking_reference,
            "Reservation made"
        );

        Ok(Some(Reservation {
            train_id: train_id.to_string(),
            seats,
            booking_reference,
        }))
    }
}

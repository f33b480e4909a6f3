use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub seat_name: String,
    pub seat_number: String,
    pub coach: String,
    /// 空字串代表尚未被預訂
    pub booking_reference: String,
}

impl Seat {
    pub fn new(
        seat_name: impl Into<String>,
        seat_number: impl Into<String>,
        coach: impl Into<String>,
        booking_reference: impl Into<String>,
    ) -> Self {
        Self {
            seat_name: seat_name.into(),
            seat_number: seat_number.into(),
            coach: coach.into(),
            booking_reference: booking_reference.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.booking_reference.is_empty()
    }
}

/// Seat state of one train as observed at the start of an allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainSnapshot {
    seats: Vec<Seat>,
}

impl TrainSnapshot {
    pub fn new(seats: Vec<Seat>) -> Self {
        Self { seats }
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn empty_seat_count(&self) -> usize {
        self.seats.iter().filter(|seat| seat.is_empty()).count()
    }

    /// Groups seats by coach in a single pass.
    ///
    /// Coaches come back in order of first appearance and each coach keeps
    /// its seats in snapshot order.
    pub fn coaches(&self) -> Vec<Coach<'_>> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut coaches: Vec<Coach<'_>> = Vec::new();

        for seat in &self.seats {
            let slot = *index.entry(seat.coach.as_str()).or_insert_with(|| {
                coaches.push(Coach {
                    id: seat.coach.as_str(),
                    seats: Vec::new(),
                });
                coaches.len() - 1
            });
            coaches[slot].seats.push(seat);
        }

        coaches
    }
}

impl From<Vec<Seat>> for TrainSnapshot {
    fn from(seats: Vec<Seat>) -> Self {
        Self::new(seats)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coach<'a> {
    pub id: &'a str,
    pub seats: Vec<&'a Seat>,
}

impl<'a> Coach<'a> {
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn empty_seat_names(&self) -> Vec<&'a str> {
        self.seats
            .iter()
            .filter(|seat| seat.is_empty())
            .map(|seat| seat.seat_name.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub train_id: String,
    pub seats: Vec<String>,
    pub booking_reference: String,
}

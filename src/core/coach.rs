use crate::core::occupation::Occupation;
use crate::domain::model::TrainSnapshot;

/// Picks the coach that ends up least occupied once `seat_count` seats are
/// booked in it, and returns that coach's empty seats in snapshot order.
///
/// Only coaches with at least `seat_count` empty seats qualify; coaches are
/// never combined. The running best starts at 100% and is replaced only by a
/// strictly lower value, so the first coach seen wins a tie and a coach that
/// would end up completely full is never picked.
pub fn best_coach_empty_seats(snapshot: &TrainSnapshot, seat_count: usize) -> Option<Vec<&str>> {
    let mut best_occupation = Occupation::FULL;
    let mut best_empty_seats = None;

    for coach in snapshot.coaches() {
        let empty_seats = coach.empty_seat_names();
        if empty_seats.len() < seat_count {
            tracing::trace!(
                coach = coach.id,
                empty = empty_seats.len(),
                "coach has too few empty seats"
            );
            continue;
        }

        let occupation = Occupation::after_booking(coach.len(), empty_seats.len(), seat_count);
        debug_assert!(
            occupation <= Occupation::FULL,
            "qualifying coach {} would be over-booked ({})",
            coach.id,
            occupation
        );
        tracing::debug!(coach = coach.id, %occupation, "coach qualifies");

        if occupation < best_occupation {
            best_occupation = occupation;
            best_empty_seats = Some(empty_seats);
        }
    }

    best_empty_seats
}

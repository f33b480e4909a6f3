use std::cmp::Ordering;
use std::fmt;

pub const DEFAULT_MAX_OCCUPATION_PERCENTAGE: u8 = 70;

/// Share of a seat set that is booked, kept as an exact ratio.
///
/// Comparisons cross-multiply so that two coaches of different sizes with the
/// same ratio compare equal, which the first-seen tie-break relies on.
#[derive(Debug, Clone, Copy)]
pub struct Occupation {
    booked: u64,
    capacity: u64,
}

impl Occupation {
    pub const FULL: Occupation = Occupation {
        booked: 1,
        capacity: 1,
    };

    /// Occupation of `capacity` seats, `empty` of them free, once `requested`
    /// more are booked.
    ///
    /// `requested` may exceed `empty`; the result is then above 100%. A count
    /// too large for `u64` saturates, which still exceeds any limit.
    pub fn after_booking(capacity: usize, empty: usize, requested: usize) -> Self {
        debug_assert!(empty <= capacity, "more empty seats than seats");
        let already_booked = capacity.saturating_sub(empty) as u64;
        let requested = u64::try_from(requested).unwrap_or(u64::MAX);
        Self {
            booked: already_booked.saturating_add(requested),
            capacity: capacity as u64,
        }
    }

    pub fn booked(&self) -> u64 {
        self.booked
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn percentage(&self) -> f64 {
        if self.capacity == 0 {
            return 100.0;
        }
        100.0 * self.booked as f64 / self.capacity as f64
    }

    /// True when strictly above `limit` percent.
    pub fn exceeds(&self, limit: u8) -> bool {
        u128::from(self.booked) * 100 > u128::from(limit) * u128::from(self.capacity)
    }
}

impl Ord for Occupation {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = u128::from(self.booked) * u128::from(other.capacity);
        let rhs = u128::from(other.booked) * u128::from(self.capacity);
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Occupation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Occupation {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Occupation {}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.percentage())
    }
}

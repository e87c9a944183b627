//! Standard breaker ratings.
//!
//! NEC 240.6(A) standard ampere ratings for fuses and inverse-time circuit
//! breakers, limited to the residential/light-commercial range the breaker
//! calculator covers. Anything above 200 A is reported as "200+".

use once_cell::sync::Lazy;

use super::{LookupTable, Recommendation};

/// Standard breaker ratings in amps, ascending
pub const STANDARD_BREAKERS: [u32; 18] = [
    15, 20, 25, 30, 35, 40, 45, 50, 60, 70, 80, 90, 100, 110, 125, 150, 175, 200,
];

/// Sentinel returned when the load exceeds the largest standard rating
pub const BREAKER_SENTINEL: &str = "200+";

static BREAKER_TABLE: Lazy<LookupTable<u32>> = Lazy::new(|| {
    LookupTable::new(
        STANDARD_BREAKERS.iter().map(|&a| (f64::from(a), a)).collect(),
        BREAKER_SENTINEL,
    )
    .expect("standard breaker ratings are strictly increasing")
});

/// Smallest standard breaker rated at or above `required_amps`.
pub fn standard_breaker_for(required_amps: f64) -> Recommendation<u32> {
    BREAKER_TABLE.recommend(required_amps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_rating() {
        assert_eq!(standard_breaker_for(20.0), Recommendation::Standard(20));
    }

    #[test]
    fn test_rounds_up() {
        assert_eq!(standard_breaker_for(20.1), Recommendation::Standard(25));
        assert_eq!(standard_breaker_for(51.0), Recommendation::Standard(60));
        assert_eq!(standard_breaker_for(1.0), Recommendation::Standard(15));
    }

    #[test]
    fn test_beyond_table() {
        assert_eq!(
            standard_breaker_for(201.0),
            Recommendation::BeyondTable(BREAKER_SENTINEL.to_string())
        );
    }
}

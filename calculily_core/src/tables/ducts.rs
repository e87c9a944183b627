//! Standard round duct diameters (inches) stocked for residential HVAC.

use once_cell::sync::Lazy;

use super::{LookupTable, Recommendation};

pub const STANDARD_DUCTS: [u32; 14] = [4, 5, 6, 7, 8, 9, 10, 12, 14, 16, 18, 20, 22, 24];

pub const DUCT_SENTINEL: &str = "Custom fabrication";

static DUCT_TABLE: Lazy<LookupTable<u32>> = Lazy::new(|| {
    LookupTable::new(
        STANDARD_DUCTS.iter().map(|&d| (f64::from(d), d)).collect(),
        DUCT_SENTINEL,
    )
    .expect("standard duct sizes are strictly increasing")
});

/// Smallest standard round duct at least `diameter_in` across.
pub fn standard_duct_for(diameter_in: f64) -> Recommendation<u32> {
    DUCT_TABLE.recommend(diameter_in)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_up_to_stock_size() {
        assert_eq!(standard_duct_for(7.2), Recommendation::Standard(8));
        assert_eq!(standard_duct_for(10.5), Recommendation::Standard(12));
        assert_eq!(standard_duct_for(3.0), Recommendation::Standard(4));
        assert!(!standard_duct_for(25.0).is_standard());
    }
}

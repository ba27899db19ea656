//! Built-in prize catalogs

use ld_core::{Category, EligibilityRule};

/// Minimum coupon holding for the electric scooter tier
pub const SCOOTER_MIN_COUPONS: u32 = 7;

/// Nine-tier festival draw, smallest prizes first
pub fn festival_categories() -> Vec<Category> {
    let tiers: [(&str, &str, u32, &str); 9] = [
        ("noise-earbuds", "NOISE PURE BUDS (EARBUDS)", 20, "Premium Earbuds"),
        ("mixer-grinder", "MIXER GRINDER-FOOD PROCESSOR", 7, "Kitchen Appliance"),
        ("samsung-a16", "SMARTPHONE - SAMSUNG A16", 6, "Samsung Galaxy A16"),
        ("double-door-fridge", "DOUBLE DOOR FRIDGE", 5, "Energy Efficient Fridge"),
        ("smart-tv-43", "43 INCH SMART TELEVISION", 4, "4K Smart TV"),
        ("split-ac-1-5", "SPLIT AC 1.5 TON", 3, "Energy Efficient AC"),
        ("laptop", "LAPTOP", 2, "High Performance Laptop"),
        ("tvs-jupiter", "TVS JUPITER", 1, "Premium Scooter"),
        ("tvs-icube", "TVS I-CUBE SCOOTERS", 3, "Electric Scooter"),
    ];

    tiers
        .iter()
        .enumerate()
        .map(|(i, &(id, name, winners, description))| {
            let category = Category::new(id, name, winners)
                .with_order(i as u32 + 1)
                .with_description(description);
            if id == "tvs-icube" {
                category.with_eligibility(EligibilityRule::min_total_coupons(SCOOTER_MIN_COUPONS))
            } else {
                category
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ld_core::CategoryCatalog;

    #[test]
    fn test_festival_catalog_is_valid() {
        let catalog = CategoryCatalog::new(festival_categories()).unwrap();
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog.total_winner_slots(), 51);
        assert!(catalog.warnings().is_empty());
        assert_eq!(catalog.get(0).unwrap().id, "noise-earbuds");

        let restricted: Vec<&str> = catalog
            .iter()
            .filter(|c| !c.eligibility.is_unrestricted())
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(restricted, vec!["tvs-icube"]);
    }
}

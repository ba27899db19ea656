//! Eligibility filter
//!
//! An entry may be drawn for a category when its coupon has not been drawn
//! anywhere in the event, its participant has not already won this category,
//! and it satisfies the category's rule.

use std::collections::{HashMap, HashSet};

use ld_core::{Category, Roster, RosterEntry};

/// Entries that may be drawn for `category` right now, in roster order
pub fn eligible<'r>(
    category: &Category,
    roster: &'r Roster,
    drawn_coupons: &HashSet<String>,
    category_winner_names: &HashMap<String, HashSet<String>>,
) -> Vec<&'r RosterEntry> {
    let names = category_winner_names.get(&category.id);
    roster
        .entries()
        .iter()
        .filter(|entry| qualifies(entry, category, drawn_coupons, names))
        .collect()
}

/// Size of the eligible pool without materialising it
pub fn eligible_count(
    category: &Category,
    roster: &Roster,
    drawn_coupons: &HashSet<String>,
    category_winner_names: &HashMap<String, HashSet<String>>,
) -> usize {
    let names = category_winner_names.get(&category.id);
    roster
        .entries()
        .iter()
        .filter(|entry| qualifies(entry, category, drawn_coupons, names))
        .count()
}

#[inline]
fn qualifies(
    entry: &RosterEntry,
    category: &Category,
    drawn_coupons: &HashSet<String>,
    names: Option<&HashSet<String>>,
) -> bool {
    !drawn_coupons.contains(&entry.coupon_id)
        && !names.is_some_and(|n| n.contains(&entry.name))
        && category.eligibility.allows(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ld_core::EligibilityRule;

    fn roster() -> Roster {
        Roster::new(vec![
            RosterEntry::new("C1", "Alice").with_total_coupons(8),
            RosterEntry::new("C2", "Alice").with_total_coupons(8),
            RosterEntry::new("C3", "Bob").with_total_coupons(2),
            RosterEntry::new("C4", "Chen"),
        ])
        .unwrap()
    }

    fn coupons(pool: &[&RosterEntry]) -> Vec<String> {
        pool.iter().map(|e| e.coupon_id.clone()).collect()
    }

    #[test]
    fn test_everyone_eligible_initially() {
        let roster = roster();
        let category = Category::new("buds", "Earbuds", 2);
        let pool = eligible(&category, &roster, &HashSet::new(), &HashMap::new());
        assert_eq!(coupons(&pool), vec!["C1", "C2", "C3", "C4"]);
    }

    #[test]
    fn test_drawn_coupon_excluded_everywhere() {
        let roster = roster();
        let drawn: HashSet<String> = ["C3".to_string()].into();
        let category = Category::new("tv", "Television", 1);
        let pool = eligible(&category, &roster, &drawn, &HashMap::new());
        assert_eq!(coupons(&pool), vec!["C1", "C2", "C4"]);
    }

    #[test]
    fn test_category_winner_name_excluded() {
        let roster = roster();
        let drawn: HashSet<String> = ["C1".to_string()].into();
        let mut names = HashMap::new();
        names.insert("buds".to_string(), HashSet::from(["Alice".to_string()]));

        let buds = Category::new("buds", "Earbuds", 3);
        assert_eq!(
            coupons(&eligible(&buds, &roster, &drawn, &names)),
            vec!["C3", "C4"]
        );

        // Alice's other coupon is still fine for a different category
        let tv = Category::new("tv", "Television", 1);
        assert_eq!(
            coupons(&eligible(&tv, &roster, &drawn, &names)),
            vec!["C2", "C3", "C4"]
        );
    }

    #[test]
    fn test_rule_threshold() {
        let roster = roster();
        let scooter = Category::new("scooter", "Scooter", 3)
            .with_eligibility(EligibilityRule::min_total_coupons(7));
        let pool = eligible(&scooter, &roster, &HashSet::new(), &HashMap::new());
        assert_eq!(coupons(&pool), vec!["C1", "C2"]);
        assert_eq!(
            eligible_count(&scooter, &roster, &HashSet::new(), &HashMap::new()),
            2
        );
    }

    #[test]
    fn test_empty_roster_gives_empty_pool() {
        let category = Category::new("buds", "Earbuds", 1);
        let roster = Roster::empty();
        let pool = eligible(&category, &roster, &HashSet::new(), &HashMap::new());
        assert!(pool.is_empty());
    }
}

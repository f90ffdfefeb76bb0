//! In-memory search over a loaded record list
//!
//! The search screen loads the full record list once and re-filters it on
//! every keystroke. The filter is a pure function over that caller-owned
//! list; it never goes back to the store.

use crate::record::Vehicle;

/// Filter records by a case-insensitive substring query.
///
/// An empty (or whitespace-only) query returns every record. Otherwise a
/// record matches when its owner name, plate number, or model contains the
/// query. Department and phone are not searched.
pub fn filter<'a>(records: &'a [Vehicle], query: &str) -> Vec<&'a Vehicle> {
    let query = query.trim();
    if query.is_empty() {
        return records.iter().collect();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|v| {
            v.owner.to_lowercase().contains(&needle)
                || v.plate.to_lowercase().contains(&needle)
                || v.model.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NewVehicle;

    fn fleet() -> Vec<Vehicle> {
        vec![
            NewVehicle::new("Kim", "Sales", "010-0000-0000", "12가3456", "Sonata")
                .into_vehicle(1),
            NewVehicle::new("Lee", "Engineering", "010-1111-1111", "34나5678", "Avante")
                .into_vehicle(2),
            NewVehicle::new("Park", "Sales", "010-2222-2222", "99나9999", "Tucson")
                .into_vehicle(3),
        ]
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let records = fleet();
        assert_eq!(filter(&records, "").len(), 3);
        assert_eq!(filter(&records, "   ").len(), 3);
    }

    #[test]
    fn test_matches_owner_plate_and_model() {
        let records = fleet();

        let by_owner = filter(&records, "kim");
        assert_eq!(by_owner.len(), 1);
        assert_eq!(by_owner[0].id, 1);

        let by_plate = filter(&records, "나9999");
        assert_eq!(by_plate.len(), 1);
        assert_eq!(by_plate[0].id, 3);

        let by_model = filter(&records, "avante");
        assert_eq!(by_model.len(), 1);
        assert_eq!(by_model[0].id, 2);
    }

    #[test]
    fn test_case_insensitive() {
        let records = fleet();
        assert_eq!(filter(&records, "SONATA").len(), 1);
        assert_eq!(filter(&records, "sOnAtA").len(), 1);
    }

    #[test]
    fn test_department_and_phone_are_not_searched() {
        let records = fleet();
        assert!(filter(&records, "Sales").is_empty());
        assert!(filter(&records, "010-1111").is_empty());
    }

    #[test]
    fn test_substring_can_span_records() {
        let records = fleet();
        // "나" appears in two plates
        assert_eq!(filter(&records, "나").len(), 2);
    }

    #[test]
    fn test_no_match() {
        let records = fleet();
        assert!(filter(&records, "Porsche").is_empty());
    }
}

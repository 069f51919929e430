use crate::parse::MealRecord;

use super::target::TargetMeal;

/// Finds the record in `snapshot` that is the same offering as `target`.
///
/// The whole snapshot is scanned on every call; positions are not stable
/// between polls. Two records sharing a key means the page was extracted
/// wrongly, so the first one is used and the clash is logged.
pub fn find_match<'a>(snapshot: &'a [MealRecord], target: &TargetMeal) -> Option<&'a MealRecord> {
    let key = target.key();
    let mut matches = snapshot.iter().filter(|record| record.key() == key);
    let first = matches.next()?;
    if matches.next().is_some() {
        log::warn!(
            "Several meals share section {:?}, menu id {:?}, number {:?}; using the first",
            key.section,
            key.menu_id,
            key.number
        );
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::fixtures::record;

    fn snapshot() -> Vec<MealRecord> {
        vec![
            record("Obědy", "10", "1", true),
            record("Obědy", "11", "2", false),
            record("Večeře", "12", "1", true),
        ]
    }

    #[test]
    fn test_finds_same_offering() {
        let target = TargetMeal::new(record("Obědy", "11", "2", true));
        let snapshot = snapshot();
        let found = find_match(&snapshot, &target).unwrap();
        assert_eq!(found.menu_id.as_deref(), Some("11"));
        assert!(!found.available());
    }

    #[test]
    fn test_every_key_field_counts() {
        let snapshot = snapshot();
        for other in [
            record("Večeře", "11", "2", false),
            record("Obědy", "99", "2", false),
            record("Obědy", "11", "3", false),
        ] {
            assert_eq!(find_match(&snapshot, &TargetMeal::new(other)), None);
        }
    }

    #[test]
    fn test_order_of_snapshot_does_not_matter() {
        let target = TargetMeal::new(record("Večeře", "12", "1", false));
        let forward = snapshot();
        let mut reversed = snapshot();
        reversed.reverse();
        assert_eq!(find_match(&forward, &target), find_match(&reversed, &target));
        assert_eq!(find_match(&forward, &target).unwrap().section, "Večeře");
    }

    #[test]
    fn test_repeated_calls_agree() {
        let snapshot = snapshot();
        let target = TargetMeal::new(record("Obědy", "10", "1", false));
        assert_eq!(find_match(&snapshot, &target), find_match(&snapshot, &target));
    }

    #[test]
    fn test_duplicate_key_uses_first() {
        let mut first = record("Obědy", "10", "1", true);
        first.name = "first".into();
        let mut second = record("Obědy", "10", "1", true);
        second.name = "second".into();
        let target = TargetMeal::new(record("Obědy", "10", "1", false));
        assert_eq!(find_match(&[first, second], &target).unwrap().name, "first");
    }

    #[test]
    fn test_empty_snapshot() {
        let target = TargetMeal::new(record("Obědy", "10", "1", false));
        assert_eq!(find_match(&[], &target), None);
    }
}

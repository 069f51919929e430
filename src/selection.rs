use std::fmt::{self, Display, Formatter};

use crate::monitor::TargetMeal;
use crate::parse::{Czk, MealRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Nothing was entered. Ends the session.
    Empty,
    NotANumber(String),
    UnknownIndex(usize),
}

impl SelectionError {
    /// Whether the operator should be asked again.
    #[must_use]
    pub const fn can_retry(&self) -> bool {
        !matches!(self, Self::Empty)
    }
}

impl Display for SelectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "No meals selected"),
            Self::NotANumber(raw) => write!(f, "{raw:?} is not a meal number"),
            Self::UnknownIndex(idx) => write!(f, "There is no meal number {idx}"),
        }
    }
}

impl std::error::Error for SelectionError {}

/// Parses `"1, 3,5"` into zero-based positions in a listing of `len` meals.
///
/// Any bad entry rejects the whole input. Repeated numbers are kept once.
pub fn parse_indices(input: &str, len: usize) -> Result<Vec<usize>, SelectionError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SelectionError::Empty);
    }
    let mut indices = vec![];
    for raw in input.split(',') {
        let raw = raw.trim();
        let idx: usize = raw
            .parse()
            .map_err(|_| SelectionError::NotANumber(raw.to_string()))?;
        if idx == 0 || idx > len {
            return Err(SelectionError::UnknownIndex(idx));
        }
        if !indices.contains(&(idx - 1)) {
            indices.push(idx - 1);
        }
    }
    Ok(indices)
}

/// Pins the meals chosen by `input` out of `listing`.
pub fn select_targets(listing: &[MealRecord], input: &str) -> Result<Vec<TargetMeal>, SelectionError> {
    let indices = parse_indices(input, listing.len())?;
    Ok(indices
        .into_iter()
        .map(|i| TargetMeal::new(listing[i].clone()))
        .collect())
}

/// Highest known price among the targets; meals without a price are ignored.
pub fn max_exposure(targets: &[TargetMeal]) -> Option<Czk> {
    targets.iter().filter_map(|t| t.price.clone()).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::fixtures::record;

    fn listing() -> Vec<MealRecord> {
        let mut meals = vec![
            record("Obědy", "1", "1", true),
            record("Obědy", "2", "2", false),
            record("Obědy", "3", "3", true),
            record("Večeře", "4", "1", false),
        ];
        meals[0].price = Some(Czk::from_minor(9500));
        meals[1].price = Some(Czk::from_minor(11900));
        meals[2].price = None;
        meals
    }

    #[test]
    fn test_select_targets() {
        let targets = select_targets(&listing(), "1, 3").unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].menu_id.as_deref(), Some("1"));
        assert_eq!(targets[1].menu_id.as_deref(), Some("3"));
        assert!(targets.iter().all(|t| !t.ordered()));
    }

    #[test]
    fn test_unknown_index_discards_everything() {
        assert_eq!(
            select_targets(&listing(), "1,5"),
            Err(SelectionError::UnknownIndex(5))
        );
        assert_eq!(
            select_targets(&listing(), "0"),
            Err(SelectionError::UnknownIndex(0))
        );
        assert!(SelectionError::UnknownIndex(5).can_retry());
    }

    #[test]
    fn test_blank_input_is_fatal() {
        assert_eq!(parse_indices("", 4), Err(SelectionError::Empty));
        assert_eq!(parse_indices("   ", 4), Err(SelectionError::Empty));
        assert!(!SelectionError::Empty.can_retry());
    }

    #[test]
    fn test_garbage_is_retried() {
        assert_eq!(
            parse_indices("1,,3", 4),
            Err(SelectionError::NotANumber(String::new()))
        );
        assert_eq!(
            parse_indices("two", 4),
            Err(SelectionError::NotANumber("two".into()))
        );
        assert_eq!(
            parse_indices("-1", 4),
            Err(SelectionError::NotANumber("-1".into()))
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(parse_indices("2,1,2", 4), Ok(vec![1, 0]));
    }

    #[test]
    fn test_max_exposure_skips_unknown_prices() {
        let targets = select_targets(&listing(), "1,2,3").unwrap();
        assert_eq!(max_exposure(&targets), Some(Czk::from_minor(11900)));
    }

    #[test]
    fn test_max_exposure_without_prices() {
        let targets = select_targets(&listing(), "3").unwrap();
        assert_eq!(max_exposure(&targets), None);
    }
}

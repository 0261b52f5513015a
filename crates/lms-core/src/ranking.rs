//! Descending, stable, 1-based rankings.

use std::cmp::Ordering;

use serde::Serialize;

/// One row of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry<T> {
    /// 1-based position.
    pub rank: usize,
    pub student_id: i32,
    pub name: String,
    /// Marks or GPA, whichever the ranking is by.
    pub value: T,
}

/// Anything a ranking can sort on.
pub trait RankValue: Copy {
    fn rank_cmp(&self, other: &Self) -> Ordering;
}

impl RankValue for u8 {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl RankValue for f64 {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

/// Sort `(student_id, name, value)` rows highest value first and number them.
///
/// Rows with equal values keep their input order.
pub fn rank_descending<T: RankValue>(mut rows: Vec<(i32, String, T)>) -> Vec<RankEntry<T>> {
    // Stable: ties keep input order.
    rows.sort_by(|a, b| b.2.rank_cmp(&a.2));
    rows.into_iter()
        .enumerate()
        .map(|(i, (student_id, name, value))| RankEntry {
            rank: i + 1,
            student_id,
            name,
            value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows<T: Copy>(values: &[(&str, T)]) -> Vec<(i32, String, T)> {
        values
            .iter()
            .enumerate()
            .map(|(i, (n, v))| (i as i32, n.to_string(), *v))
            .collect()
    }

    #[test]
    fn ties_keep_input_order() {
        let ranked = rank_descending(rows(&[("A", 70u8), ("B", 90), ("C", 70)]));
        let order: Vec<_> = ranked.iter().map(|e| (e.name.as_str(), e.value)).collect();
        assert_eq!(order, vec![("B", 90), ("A", 70), ("C", 70)]);
        assert_eq!(
            ranked.iter().map(|e| e.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn gpa_values_sort_descending() {
        let ranked = rank_descending(rows(&[("Low", 1.5f64), ("High", 3.9), ("Zero", 0.0)]));
        assert_eq!(ranked[0].name, "High");
        assert_eq!(ranked[2].name, "Zero");
    }

    #[test]
    fn empty_input_ranks_nothing() {
        assert!(rank_descending::<u8>(Vec::new()).is_empty());
    }
}

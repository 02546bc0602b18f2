//! Column-width allocation under a fixed character budget.
//!
//! Weights are dimensionless `f64` values used only for proportional division
//! of the usable width; they are floored once, when widths are materialized.

use crate::error::TableError;

/// Columns consumed by structure on every line: left border, right border,
/// one leading pad column, and the line terminator.
pub const STRUCTURAL_OVERHEAD: usize = 4;

/// Resolved geometry for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    /// Width budget left for cell content after borders and separators.
    pub usable_width: usize,
    /// Per-column content width.
    pub column_widths: Vec<usize>,
    /// Spaces emitted before every line to center the table.
    pub start_padding: usize,
}

/// `max(defined columns, longest row, 1)`.
pub fn column_count<R, S>(defined: usize, rows: &[R]) -> usize
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let longest_row = rows
        .iter()
        .map(|row| row.as_ref().len())
        .max()
        .unwrap_or(0);
    defined.max(longest_row).max(1)
}

/// Width left for cell content, or an error when each column cannot get more
/// than one character.
pub fn usable_width(total_width: usize, columns: usize) -> Result<usize, TableError> {
    let structure = STRUCTURAL_OVERHEAD + columns.saturating_sub(1);
    let usable = total_width.saturating_sub(structure);
    if usable <= columns {
        return Err(TableError::InsufficientWidth {
            total_width,
            columns,
        });
    }
    Ok(usable)
}

/// Fixed-mode weights: the defined factor per column, 1 for undefined ones.
pub fn fixed_weights(factors: &[u32], columns: usize) -> Vec<f64> {
    (0..columns)
        .map(|i| factors.get(i).copied().map_or(1.0, f64::from))
        .collect()
}

/// Autosize weights from each column's natural need (longest cell).
///
/// Columns that fit the ideal width keep their need as weight. Wider columns
/// start at the ideal width and receive the slack left by narrow columns in
/// proportion to how far they are over budget. The share is not capped, so a
/// wide column may end up weighted above its own need.
pub fn autosize_weights(needs: &[usize], usable_width: usize) -> Vec<f64> {
    if needs.is_empty() {
        return Vec::new();
    }
    let ideal = (usable_width / needs.len()) as f64;

    let (free_space, needed_space) =
        needs
            .iter()
            .fold((0.0_f64, 0.0_f64), |(free, needed), &need| {
                let need = need as f64;
                if need < ideal {
                    (free + (ideal - need), needed)
                } else if need > ideal {
                    (free, needed + (need - ideal))
                } else {
                    (free, needed)
                }
            });

    let share = if needed_space > 0.0 {
        free_space / needed_space
    } else {
        0.0
    };

    needs
        .iter()
        .map(|&need| {
            let need = need as f64;
            if need <= ideal {
                need
            } else {
                ideal + share * (need - ideal)
            }
        })
        .collect()
}

/// Normalize weights against `usable_width` and floor each share.
///
/// A zero weight total (no column resolved, or autosize over empty content)
/// falls back to equal weights.
pub fn column_widths(weights: &[f64], usable_width: usize) -> Vec<usize> {
    let weights: Vec<f64> = if weights.is_empty() {
        vec![1.0]
    } else if weights.iter().sum::<f64>() <= 0.0 {
        vec![1.0; weights.len()]
    } else {
        weights.to_vec()
    };
    let total: f64 = weights.iter().sum();
    let usable = usable_width as f64;
    weights
        .iter()
        .map(|weight| (usable / total * weight).floor() as usize)
        .collect()
}

/// Leading pad that centers the table: half the unallocated width, plus one.
pub fn start_padding(usable_width: usize, column_widths: &[usize]) -> usize {
    let allocated: usize = column_widths.iter().sum();
    usable_width.saturating_sub(allocated) / 2 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_ROWS: &[Vec<&str>] = &[];

    #[test]
    fn column_count_is_never_zero() {
        assert_eq!(column_count(0, NO_ROWS), 1);
        assert_eq!(column_count(2, NO_ROWS), 2);
        assert_eq!(column_count(1, &[vec!["a", "b", "c"], vec!["d"]]), 3);
    }

    #[test]
    fn usable_width_subtracts_structure_and_separators() {
        assert_eq!(usable_width(40, 2).unwrap(), 35);
        assert_eq!(usable_width(6, 1).unwrap(), 2);
    }

    #[test]
    fn usable_width_rejects_too_narrow_tables() {
        assert!(matches!(
            usable_width(4, 1),
            Err(TableError::InsufficientWidth {
                total_width: 4,
                columns: 1
            })
        ));
        assert!(usable_width(5, 1).is_err());
        assert!(usable_width(0, 3).is_err());
        // 3 columns: 4 structure + 2 separators, usable must exceed 3.
        assert!(usable_width(9, 3).is_err());
        assert_eq!(usable_width(10, 3).unwrap(), 4);
    }

    #[test]
    fn fixed_weights_default_undefined_columns_to_one() {
        assert_eq!(fixed_weights(&[2, 3], 4), vec![2.0, 3.0, 1.0, 1.0]);
    }

    #[test]
    fn fixed_widths_follow_factors() {
        let widths = column_widths(&fixed_weights(&[1, 3], 2), 40);
        assert_eq!(widths, vec![10, 30]);
    }

    #[test]
    fn autosize_keeps_narrow_columns_at_their_need() {
        let weights = autosize_weights(&[2, 38], 35);
        assert_eq!(weights[0], 2.0);
        // ideal 17, free 15, needed 21: 17 + 15/21 * 21
        assert!((weights[1] - 32.0).abs() < 1e-9, "got {}", weights[1]);
    }

    #[test]
    fn autosize_without_wide_columns_skips_redistribution() {
        assert_eq!(autosize_weights(&[3, 5, 0], 30), vec![3.0, 5.0, 0.0]);
    }

    #[test]
    fn autosize_hands_all_slack_to_the_wide_column() {
        // ideal 19, free 36, needed 11: 19 + 36/11 * 11
        let weights = autosize_weights(&[1, 1, 30], 58);
        assert_eq!(weights[..2], [1.0, 1.0]);
        assert!((weights[2] - 55.0).abs() < 1e-9, "got {}", weights[2]);
        assert_eq!(column_widths(&weights, 58), vec![1, 1, 55]);
    }

    #[test]
    fn autosize_splits_slack_by_overshoot() {
        // ideal 10, free 9, needed 5 + 13 = 18: share 0.5
        let weights = autosize_weights(&[1, 15, 23], 30);
        assert_eq!(weights, vec![1.0, 12.5, 16.5]);
    }

    #[test]
    fn zero_total_weight_falls_back_to_equal_split() {
        assert_eq!(column_widths(&[0.0, 0.0], 10), vec![5, 5]);
        assert_eq!(column_widths(&[], 7), vec![7]);
    }

    #[test]
    fn widths_never_exceed_usable_width() {
        let widths = column_widths(&[1.0, 1.0, 1.0], 10);
        assert_eq!(widths, vec![3, 3, 3]);
        assert_eq!(start_padding(10, &widths), 1);
    }

    #[test]
    fn start_padding_centers_unallocated_space() {
        assert_eq!(start_padding(35, &[2, 20]), 7);
        assert_eq!(start_padding(35, &[35]), 1);
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fixed_widths_fit_the_budget(
                factors in proptest::collection::vec(1u32..20, 1..8),
                extra in 0usize..200
            ) {
                let columns = factors.len();
                let usable = columns + extra;
                let weights = fixed_weights(&factors, columns);
                prop_assert!(weights.iter().sum::<f64>() > 0.0);
                let widths = column_widths(&weights, usable);
                prop_assert_eq!(widths.len(), columns);
                prop_assert!(widths.iter().sum::<usize>() <= usable);
            }

            #[test]
            fn autosize_weights_respect_needs(
                needs in proptest::collection::vec(0usize..120, 1..8),
                usable in 8usize..200
            ) {
                let ideal = (usable / needs.len()) as f64;
                let weights = autosize_weights(&needs, usable);
                let mut any_wide = false;
                for (need, weight) in needs.iter().zip(&weights) {
                    let need = *need as f64;
                    if need <= ideal {
                        prop_assert_eq!(*weight, need);
                    } else {
                        any_wide = true;
                        prop_assert!(*weight >= ideal);
                    }
                }
                if any_wide {
                    // Slack is moved, never created or lost.
                    let total: f64 = weights.iter().sum();
                    prop_assert!((total - ideal * needs.len() as f64).abs() < 1e-6);
                }
                let widths = column_widths(&weights, usable);
                prop_assert!(widths.iter().sum::<usize>() <= usable);
            }
        }
    }
}

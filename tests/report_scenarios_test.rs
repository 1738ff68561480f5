/// Scenario checks for the price-report arithmetic: rolling averages,
/// merchant slot renumbering, and export cell rendering.

// ---------------------------------------------------------------------------
// Daily average
// ---------------------------------------------------------------------------

#[cfg(test)]
mod daily_average {
    /// Mean of merchant prices, rounded half-up; None for an empty list so
    /// a hand-entered average is preserved.
    fn daily_average(prices: &[i64]) -> Option<i64> {
        if prices.is_empty() {
            return None;
        }
        let sum: i64 = prices.iter().sum();
        Some((sum as f64 / prices.len() as f64).round() as i64)
    }

    #[test]
    fn test_three_merchants_round_down() {
        // round(40000 / 3) = 13333
        assert_eq!(daily_average(&[13000, 14000, 13000]), Some(13333));
    }

    #[test]
    fn test_midpoint_rounds_up() {
        assert_eq!(daily_average(&[13000, 13001]), Some(13001));
    }

    #[test]
    fn test_single_merchant_is_identity() {
        assert_eq!(daily_average(&[18000]), Some(18000));
    }

    #[test]
    fn test_empty_list_preserves_explicit_average() {
        let explicit = 15000i64;
        assert_eq!(daily_average(&[]).unwrap_or(explicit), 15000);
    }
}

// ---------------------------------------------------------------------------
// Merchant slot renumbering
// ---------------------------------------------------------------------------

#[cfg(test)]
mod slot_renumbering {
    fn renumber(prices: Vec<i64>) -> Vec<(u32, String, i64)> {
        prices
            .into_iter()
            .enumerate()
            .map(|(i, p)| (i as u32 + 1, format!("Pedagang {}", i + 1), p))
            .collect()
    }

    #[test]
    fn test_removal_closes_the_gap() {
        let after_remove: Vec<i64> = vec![13000, 13000]; // slot 2 removed
        let renumbered = renumber(after_remove);
        assert_eq!(
            renumbered,
            vec![
                (1, "Pedagang 1".to_string(), 13000),
                (2, "Pedagang 2".to_string(), 13000),
            ]
        );
    }

    #[test]
    fn test_slots_are_dense_from_one() {
        let renumbered = renumber(vec![11000, 12000, 13000, 14000]);
        for (i, (slot, name, _)) in renumbered.iter().enumerate() {
            assert_eq!(*slot, i as u32 + 1);
            assert_eq!(name, &format!("Pedagang {}", i + 1));
        }
    }
}

// ---------------------------------------------------------------------------
// Export cell rendering
// ---------------------------------------------------------------------------

#[cfg(test)]
mod export_cells {
    fn group_number(position: usize) -> String {
        format!("{:03}", position)
    }

    fn rupiah(value: i64) -> String {
        let digits = value.to_string();
        let mut out = String::new();
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(ch);
        }
        format!("Rp {}", out)
    }

    #[test]
    fn test_group_numbers_are_zero_padded() {
        assert_eq!(group_number(1), "001");
        assert_eq!(group_number(42), "042");
        assert_eq!(group_number(100), "100");
    }

    #[test]
    fn test_rupiah_grouping() {
        assert_eq!(rupiah(13333), "Rp 13.333");
        assert_eq!(rupiah(900), "Rp 900");
        assert_eq!(rupiah(1250000), "Rp 1.250.000");
    }

    #[test]
    fn test_column_width_is_longest_cell_plus_two() {
        let column = ["Variant", "Beras Cap C4 (Medium)", "Gula Pasir"];
        let width = column.iter().map(|c| c.chars().count()).max().unwrap() + 2;
        assert_eq!(width, 23);
    }
}

use crate::format;

/// Cleans the sats field: strips every non-digit, regroups.
///
/// Caret strategy: count the real digits sitting to the left of the caret,
/// then walk the formatted output until that many digits have been passed
/// and land immediately after the last one. The caret rides its digit even
/// as grouping spaces appear or disappear anywhere in the string.
pub fn sanitize_sats(raw: &str, caret: usize) -> (String, usize) {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let clean = format::group_digits(&digits);

    let digits_before = raw
        .chars()
        .take(caret)
        .filter(|c| c.is_ascii_digit())
        .count();

    let mut new_caret = 0;
    if digits_before > 0 {
        let mut seen = 0;
        for (i, ch) in clean.chars().enumerate() {
            if ch != ' ' {
                seen += 1;
            }
            if seen == digits_before {
                new_caret = i + 1;
                break;
            }
        }
    }

    (clean, new_caret)
}

/// Cleans the EUR field: strips everything but digits and the first decimal
/// point, then caps the fractional part at `max_dp` digits.
///
/// Caret strategy: shift left by however many characters the same
/// strip/collapse removed from the prefix before the caret. Capping only
/// ever removes trailing characters, so it cannot change the prefix count;
/// a caret that sat inside the truncated tail clamps to the end instead.
pub fn sanitize_eur(raw: &str, caret: usize, max_dp: usize) -> (String, usize) {
    let stripped = strip_eur(raw);
    let clean = format::cap_fractional_digits(&stripped, max_dp);

    let prefix_len = raw.chars().count().min(caret);
    let prefix: String = raw.chars().take(prefix_len).collect();
    let removed = prefix_len - strip_eur(&prefix).chars().count();
    let new_caret = caret.saturating_sub(removed).min(clean.chars().count());

    (clean, new_caret)
}

fn strip_eur(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut seen_dot = false;
    for ch in s.chars() {
        match ch {
            '0'..='9' => out.push(ch),
            '.' if !seen_dot => {
                seen_dot = true;
                out.push(ch);
            }
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sats_strips_and_groups() {
        let (clean, _) = sanitize_sats("12a34 56?7", 0);
        assert_eq!(clean, "1 234 567");
    }

    #[test]
    fn caret_rides_its_digit_across_regrouping() {
        // Typing '5' at the end of "1 234" gives "1 2345" with the caret
        // after the '5'; regrouping moves the space but not the caret's digit.
        let (clean, caret) = sanitize_sats("1 2345", 6);
        assert_eq!(clean, "12 345");
        assert_eq!(caret, 6);
    }

    #[test]
    fn caret_at_start_stays_at_zero() {
        let (_, caret) = sanitize_sats(" 123", 1);
        assert_eq!(caret, 0);
    }

    #[test]
    fn caret_mid_string_counts_digits_only() {
        // "12a34" caret after the 'a': two digits precede it.
        let (clean, caret) = sanitize_sats("12a34", 3);
        assert_eq!(clean, "1 234");
        assert_eq!(caret, 2);
    }

    #[test]
    fn eur_keeps_single_decimal_point() {
        let (clean, _) = sanitize_eur("1.2.3", 0, 2);
        assert_eq!(clean, "1.23");
    }

    #[test]
    fn eur_caps_fractional_digits() {
        let (clean, _) = sanitize_eur("12.3456", 0, 2);
        assert_eq!(clean, "12.34");
    }

    #[test]
    fn eur_caret_shifts_by_removed_prefix_chars() {
        // "1a2.3" caret after the '2' (offset 3): the stripped 'a' pulls it
        // left by one.
        let (clean, caret) = sanitize_eur("1a2.3", 3, 2);
        assert_eq!(clean, "12.3");
        assert_eq!(caret, 2);
    }

    #[test]
    fn eur_caret_inside_truncated_tail_clamps() {
        let (clean, caret) = sanitize_eur("12.3456", 7, 2);
        assert_eq!(clean, "12.34");
        assert_eq!(caret, 5);
    }

    #[test]
    fn both_rules_are_idempotent() {
        for raw in ["", "abc", "1 234 567", "12.34", "0.0.0", "  9,99 "] {
            let (once, _) = sanitize_sats(raw, 0);
            let (twice, _) = sanitize_sats(&once, 0);
            assert_eq!(once, twice, "sats rule not idempotent on {:?}", raw);

            let (once, _) = sanitize_eur(raw, 0, 2);
            let (twice, _) = sanitize_eur(&once, 0, 2);
            assert_eq!(once, twice, "eur rule not idempotent on {:?}", raw);
        }
    }
}

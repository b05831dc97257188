use crate::types::SATS_PER_BTC;

/// Parses the sats field's display string (grouping spaces included).
/// Empty or non-numeric content yields None.
pub fn parse_sats_display(s: &str) -> Option<u64> {
    let digits: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Parses the EUR field's display string. Empty, non-numeric, or negative
/// content yields None.
pub fn parse_eur_display(s: &str) -> Option<f64> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Converts a sats amount to a EUR display string with exactly `max_dp`
/// fractional digits.
pub fn sats_to_eur(sats: u64, rate: f64, max_dp: usize) -> String {
    let eur = (sats as f64 / SATS_PER_BTC as f64) * rate;
    format!("{:.*}", max_dp, eur)
}

/// Converts a EUR amount to whole sats, rounding to the nearest sat.
pub fn eur_to_sats(amount: f64, rate: f64) -> u64 {
    ((amount / rate) * SATS_PER_BTC as f64).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAX_EUR_DP;

    #[test]
    fn whole_btc_at_fifty_thousand() {
        assert_eq!(sats_to_eur(100_000_000, 50_000.0, MAX_EUR_DP), "50000.00");
        assert_eq!(eur_to_sats(25_000.0, 50_000.0), 50_000_000);
    }

    #[test]
    fn small_amounts() {
        assert_eq!(sats_to_eur(0, 50_000.0, MAX_EUR_DP), "0.00");
        assert_eq!(eur_to_sats(0.01, 50_000.0), 20);
        assert_eq!(sats_to_eur(20, 50_000.0, MAX_EUR_DP), "0.01");
    }

    #[test]
    fn round_trips_within_one_cent() {
        let rate = 50_000.0;
        for x in [0.0, 0.01, 100.0, 9_999.99] {
            let back: f64 = sats_to_eur(eur_to_sats(x, rate), rate, MAX_EUR_DP)
                .parse()
                .unwrap();
            assert!(
                (back - x).abs() <= 0.01,
                "{} round-tripped to {}",
                x,
                back
            );
        }
    }

    #[test]
    fn display_parsing_ignores_grouping() {
        assert_eq!(parse_sats_display("1 234 567"), Some(1_234_567));
        assert_eq!(parse_sats_display(""), None);
        assert_eq!(parse_sats_display("12x"), None);
        assert_eq!(parse_eur_display("9999.99"), Some(9_999.99));
        assert_eq!(parse_eur_display("1."), Some(1.0));
        assert_eq!(parse_eur_display(""), None);
        assert_eq!(parse_eur_display("."), None);
    }
}

/// Inserts space thousand separators into a pure-digit string.
/// Groups of three from the right; fewer than four digits pass through.
pub fn group_digits(digits: &str) -> String {
    let len = digits.chars().count();
    if len < 4 {
        return digits.to_string();
    }
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Keeps only the first decimal point and truncates the fractional part
/// to at most `max_dp` characters. The integer part is never touched.
pub fn cap_fractional_digits(s: &str, max_dp: usize) -> String {
    let (head, tail) = match s.split_once('.') {
        None => return s.to_string(),
        Some(parts) => parts,
    };
    let frac: String = tail.chars().filter(|c| *c != '.').take(max_dp).collect();
    format!("{}.{}", head, frac)
}

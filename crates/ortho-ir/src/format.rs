//! Number formatting for instruction and validation text.

/// Format a value as given: shortest exact decimal form, no trailing `.0`.
///
/// Used for values taken from the input, which must be restated exactly.
pub fn exact(v: f64) -> String {
    if v == 0.0 {
        // Avoid "-0".
        return "0".to_string();
    }
    format!("{v}")
}

/// Format a computed value rounded to `places` decimals, trailing zeros trimmed.
pub fn rounded(v: f64, places: usize) -> String {
    let s = format!("{v:.places$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

/// Exact value with a millimetre suffix.
pub fn mm(v: f64) -> String {
    format!("{} mm", exact(v))
}

/// Exact value with a degree sign.
pub fn deg(v: f64) -> String {
    format!("{}°", exact(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact() {
        assert_eq!(exact(70.0), "70");
        assert_eq!(exact(12.5), "12.5");
        assert_eq!(exact(-0.0), "0");
        assert_eq!(mm(15.0), "15 mm");
        assert_eq!(deg(30.0), "30°");
    }

    #[test]
    fn test_rounded() {
        assert_eq!(rounded(60.621778264910705, 2), "60.62");
        assert_eq!(rounded(35.0, 2), "35");
        assert_eq!(rounded(34.999999, 2), "35");
        assert_eq!(rounded(-0.0001, 2), "0");
    }
}

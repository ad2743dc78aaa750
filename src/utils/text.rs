use chrono::{DateTime, Utc};
use chrono_tz::Asia::Kolkata;
use std::time::{SystemTime, UNIX_EPOCH};

/// Word-wise title casing: a letter is uppercased when the previous char is not a letter,
/// lowercased otherwise. `"pharma-tech"` → `"Pharma-Tech"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// First `max` chars of `s` (char-based, never splits a code point).
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Seconds since the Unix epoch, sub-second precision.
pub fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// `YYYY-MM-DD HH:MM IST` for the given instant.
pub fn ist_stamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Kolkata).format("%Y-%m-%d %H:%M IST").to_string()
}

pub fn ist_now() -> String {
    ist_stamp(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("pharmaceuticals"), "Pharmaceuticals");
        assert_eq!(title_case("ai"), "Ai");
        assert_eq!(title_case("real estate"), "Real Estate");
        assert_eq!(title_case("pharma-tech"), "Pharma-Tech");
        assert_eq!(title_case("FMCG"), "Fmcg");
        assert_eq!(title_case("3d printing"), "3D Printing");
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("₹₹₹₹", 2), "₹₹");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn test_ist_stamp_offsets_utc() {
        let at = Utc.with_ymd_and_hms(2025, 1, 31, 20, 0, 0).unwrap();
        assert_eq!(ist_stamp(at), "2025-02-01 01:30 IST");
    }
}

//! Calendar-date helpers for the synthesis window.
//!
//! All arithmetic goes through julian-day offsets so that window draws
//! are uniform over days, not over (year, month, day) triples.

use time::{Date, Duration};

use crate::rng::SeedStream;

/// January 1 of `year`. Years are validated to 1970..=9000 upstream.
pub fn year_start(year: i32) -> Date {
    Date::from_ordinal_date(year, 1).unwrap_or(Date::MIN)
}

/// December 31 of `year`.
pub fn year_end(year: i32) -> Date {
    let days = if time::util::is_leap_year(year) { 366 } else { 365 };
    Date::from_ordinal_date(year, days).unwrap_or(Date::MAX)
}

pub fn add_days(date: Date, days: i64) -> Date {
    date.saturating_add(Duration::days(days))
}

/// Uniform date in [lo, hi] inclusive.
pub fn random_date_in(rng: &mut SeedStream, lo: Date, hi: Date) -> Date {
    let lo_j = lo.to_julian_day();
    let hi_j = hi.to_julian_day();
    let offset = rng.range_i64(0, i64::from(hi_j - lo_j));
    Date::from_julian_day(lo_j + offset as i32).unwrap_or(lo)
}

/// Downstream-document date rule: `upstream + floor(rng*window) + offset`.
pub fn downstream_date(rng: &mut SeedStream, upstream: Date, window: i64, offset: i64) -> Date {
    let jitter = (rng.next_f64() * window as f64) as i64;
    add_days(upstream, jitter + offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Seed;

    #[test]
    fn year_bounds() {
        assert_eq!(year_start(2023).to_string(), "2023-01-01");
        assert_eq!(year_end(2024).to_string(), "2024-12-31");
    }

    #[test]
    fn random_date_stays_in_window() {
        let mut rng = SeedStream::from_seed(&Seed::Int(3));
        let lo = year_start(2023);
        let hi = year_end(2024);
        for _ in 0..500 {
            let d = random_date_in(&mut rng, lo, hi);
            assert!(d >= lo && d <= hi);
        }
    }

    #[test]
    fn downstream_date_never_precedes_upstream() {
        let mut rng = SeedStream::from_seed(&Seed::Int(4));
        let base = year_start(2023);
        for _ in 0..200 {
            let d = downstream_date(&mut rng, base, 15, 1);
            assert!(d > base);
            assert!(d <= add_days(base, 16));
        }
    }
}

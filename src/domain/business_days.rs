//! Business-day calendar used to date forecast output.
//!
//! A business day is Monday to Friday. Exchange holidays are not modelled: the
//! forecast calendar only skips weekends.

use chrono::{Datelike, Days, NaiveDate, Weekday};

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// First business day on or after `date`.
pub fn roll_forward(date: NaiveDate) -> Option<NaiveDate> {
    let mut current = date;
    while !is_business_day(current) {
        current = current.checked_add_days(Days::new(1))?;
    }
    Some(current)
}

/// `periods` consecutive business days starting at `start`.
/// A weekend `start` rolls forward to the following Monday.
/// Stops short only if the calendar runs off the end of `NaiveDate`.
pub fn business_days_from(start: NaiveDate, periods: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(periods);
    let Some(mut current) = roll_forward(start) else {
        return dates;
    };

    while dates.len() < periods {
        dates.push(current);
        match current
            .checked_add_days(Days::new(1))
            .and_then(roll_forward)
        {
            Some(next) => current = next,
            None => break,
        }
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_thirty_business_days_from_mid_august_2019() {
        let dates = business_days_from(ymd(2019, 8, 13), 30);

        assert_eq!(dates.len(), 30);
        assert_eq!(dates[0], ymd(2019, 8, 13), "Tuesday start is kept");
        assert_eq!(dates[4], ymd(2019, 8, 19), "Weekend of 17/18 skipped");
        assert_eq!(dates[29], ymd(2019, 9, 23));
        assert!(dates.iter().all(|d| is_business_day(*d)));
        assert!(dates.windows(2).all(|w| w[0] < w[1]), "Strictly increasing");
    }

    #[test]
    fn test_weekend_start_rolls_to_monday() {
        let saturday = ymd(2019, 8, 17);
        let dates = business_days_from(saturday, 3);
        assert_eq!(dates, vec![ymd(2019, 8, 19), ymd(2019, 8, 20), ymd(2019, 8, 21)]);
    }

    #[test]
    fn test_zero_periods_is_empty() {
        assert!(business_days_from(ymd(2019, 8, 13), 0).is_empty());
    }

    #[test]
    fn test_friday_to_monday() {
        let dates = business_days_from(ymd(2019, 9, 13), 2);
        assert_eq!(dates, vec![ymd(2019, 9, 13), ymd(2019, 9, 16)]);
    }
}

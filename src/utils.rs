use chrono::{Datelike, NaiveDate};

/// Thousands-separated integer with "." group separators (id-ID digits),
/// e.g. 13000 -> "13.000".
pub fn format_thousands(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if negative {
        format!("-{}", out)
    } else {
        out
    }
}

/// Rupiah cell rendering, e.g. 13000 -> "Rp 13.000".
pub fn format_rupiah(value: i64) -> String {
    format!("Rp {}", format_thousands(value))
}

const WEEKDAYS_ID: [&str; 7] = [
    "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu",
];

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Long-form Indonesian date, e.g. "Senin, 17 Agustus 2026".
pub fn format_long_date_id(date: NaiveDate) -> String {
    let weekday = WEEKDAYS_ID[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS_ID[date.month0() as usize];
    format!("{}, {} {} {}", weekday, date.day(), month, date.year())
}

/// ISO date for export file names.
pub fn format_date_for_file_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands_groups_of_three() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1.000");
        assert_eq!(format_thousands(13333), "13.333");
        assert_eq!(format_thousands(1250000), "1.250.000");
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(15000), "Rp 15.000");
    }

    #[test]
    fn test_long_date_indonesian() {
        // 2026-08-17 is a Monday.
        let date = NaiveDate::from_ymd_opt(2026, 8, 17).unwrap();
        assert_eq!(format_long_date_id(date), "Senin, 17 Agustus 2026");

        let date = NaiveDate::from_ymd_opt(2025, 12, 7).unwrap();
        assert_eq!(format_long_date_id(date), "Minggu, 7 Desember 2025");
    }

    #[test]
    fn test_file_name_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(format_date_for_file_name(date), "2026-01-05");
    }
}

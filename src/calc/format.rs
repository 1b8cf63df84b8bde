//! Indonesian display formatting for money, dates and numbers.

use chrono::{Datelike, Months, NaiveDate};

const MONTHS: [&str; 12] = [
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

const DAYS: [&str; 7] = ["Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu"];

const UNITS: [&str; 12] = [
    "", "satu", "dua", "tiga", "empat", "lima", "enam", "tujuh", "delapan", "sembilan",
    "sepuluh", "sebelas",
];

/// Indonesian month name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    let index = (month.max(1) as usize - 1).min(MONTHS.len() - 1);
    MONTHS[index]
}

/// Indonesian weekday name (e.g. "Jumat").
pub fn day_name(date: NaiveDate) -> &'static str {
    DAYS[date.weekday().num_days_from_monday() as usize]
}

/// Long-form date (e.g. "15 Maret 2024").
pub fn format_long_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), month_name(date.month()), date.year())
}

/// Long-form date with weekday (e.g. "Jumat, 15 Maret 2024").
pub fn format_day_date(date: NaiveDate) -> String {
    format!("{}, {}", day_name(date), format_long_date(date))
}

/// Place and date line above a signature (e.g. "Jakarta, 15 Maret 2024").
pub fn format_place_date(place: &str, date: NaiveDate) -> String {
    let place = place.trim();
    if place.is_empty() {
        format_long_date(date)
    } else {
        format!("{}, {}", place, format_long_date(date))
    }
}

/// Group digits by thousands with `.` (e.g. "1.234.567").
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Whole-rupiah currency string (e.g. "Rp 1.234.567").
pub fn format_rupiah(amount: f64) -> String {
    if !amount.is_finite() {
        return "Rp -".to_string();
    }
    let rounded = amount.round();
    let grouped = group_thousands(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

/// Decimal number with Indonesian separators, at most `max_decimals` digits
/// after the comma and no trailing zeros (e.g. `4.99` → "4,99").
pub fn format_decimal(value: f64, max_decimals: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let fixed = format!("{:.*}", max_decimals, value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');
    let whole: u64 = whole.parse().unwrap_or(0);
    let sign = if value < 0.0 && (whole > 0 || !fraction.is_empty()) {
        "-"
    } else {
        ""
    };

    if fraction.is_empty() {
        format!("{sign}{}", group_thousands(whole))
    } else {
        format!("{sign}{},{fraction}", group_thousands(whole))
    }
}

/// Percentage with up to two decimals (e.g. "4,99%").
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_decimal(value, 2))
}

/// Spell out a whole number in Indonesian (e.g. 1500 → "seribu lima ratus").
pub fn terbilang(value: u64) -> String {
    if value == 0 {
        return "nol".to_string();
    }
    spell(value)
}

fn spell(n: u64) -> String {
    const SCALES: [(u64, &str); 4] = [
        (1_000_000_000_000_000, "kuadriliun"),
        (1_000_000_000_000, "triliun"),
        (1_000_000_000, "miliar"),
        (1_000_000, "juta"),
    ];

    let (head, rest) = match n {
        0 => return String::new(),
        1..=11 => return UNITS[n as usize].to_string(),
        12..=19 => return format!("{} belas", UNITS[(n - 10) as usize]),
        20..=99 => (format!("{} puluh", UNITS[(n / 10) as usize]), n % 10),
        100..=199 => ("seratus".to_string(), n - 100),
        200..=999 => (format!("{} ratus", UNITS[(n / 100) as usize]), n % 100),
        1_000..=1_999 => ("seribu".to_string(), n - 1_000),
        2_000..=999_999 => (format!("{} ribu", spell(n / 1_000)), n % 1_000),
        _ => {
            let (scale, name) = SCALES
                .iter()
                .copied()
                .find(|(scale, _)| n >= *scale)
                .unwrap_or(SCALES[SCALES.len() - 1]);
            (format!("{} {}", spell(n / scale), name), n % scale)
        }
    };

    if rest == 0 {
        head
    } else {
        format!("{} {}", head, spell(rest))
    }
}

/// Spelled-out rupiah amount (e.g. "lima juta rupiah").
pub fn terbilang_rupiah(amount: f64) -> String {
    if !amount.is_finite() {
        return "-".to_string();
    }
    let rounded = amount.round();
    let words = terbilang(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("minus {words} rupiah")
    } else {
        format!("{words} rupiah")
    }
}

/// Capitalize the first letter, used when a spelled-out amount opens a phrase.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Add whole months, clamping to the end of shorter months.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Completed calendar months between two dates (0 when `end` precedes `start`).
pub fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 0;
    }
    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() < start.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// Length of service in years and months (e.g. "4 tahun 11 bulan").
pub fn format_duration(start: NaiveDate, end: NaiveDate) -> String {
    let months = months_between(start, end);
    let (years, months) = (months / 12, months % 12);
    match (years, months) {
        (0, 0) => "kurang dari 1 bulan".to_string(),
        (0, m) => format!("{m} bulan"),
        (y, 0) => format!("{y} tahun"),
        (y, m) => format!("{y} tahun {m} bulan"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(0.0), "Rp 0");
        assert_eq!(format_rupiah(950.0), "Rp 950");
        assert_eq!(format_rupiah(1_234_567.0), "Rp 1.234.567");
        assert_eq!(format_rupiah(722_500_000.0), "Rp 722.500.000");
        assert_eq!(format_rupiah(-15_000.4), "-Rp 15.000");
        assert_eq!(format_rupiah(f64::NAN), "Rp -");
    }

    #[test]
    fn test_format_dates() {
        let d = date(2024, 3, 15);
        assert_eq!(format_long_date(d), "15 Maret 2024");
        assert_eq!(format_day_date(d), "Jumat, 15 Maret 2024");
        assert_eq!(format_place_date("Jakarta", d), "Jakarta, 15 Maret 2024");
        assert_eq!(format_place_date("  ", d), "15 Maret 2024");
    }

    #[test]
    fn test_format_decimal_and_percent() {
        assert_eq!(format_percent(4.99), "4,99%");
        assert_eq!(format_percent(15.0), "15%");
        assert_eq!(format_percent(31.7615), "31,76%");
        assert_eq!(format_decimal(1234.5, 2), "1.234,5");
        assert_eq!(format_decimal(-0.001, 2), "0");
    }

    #[test]
    fn test_terbilang() {
        assert_eq!(terbilang(0), "nol");
        assert_eq!(terbilang(11), "sebelas");
        assert_eq!(terbilang(15), "lima belas");
        assert_eq!(terbilang(21), "dua puluh satu");
        assert_eq!(terbilang(100), "seratus");
        assert_eq!(terbilang(1_000), "seribu");
        assert_eq!(terbilang(1_500), "seribu lima ratus");
        assert_eq!(terbilang(12_000), "dua belas ribu");
        assert_eq!(terbilang(1_250_000), "satu juta dua ratus lima puluh ribu");
        assert_eq!(terbilang(3_000_000_000), "tiga miliar");
        assert_eq!(terbilang_rupiah(5_000_000.0), "lima juta rupiah");
    }

    #[test]
    fn test_duration() {
        assert_eq!(format_duration(date(2019, 3, 1), date(2024, 2, 29)), "4 tahun 11 bulan");
        assert_eq!(format_duration(date(2020, 1, 10), date(2023, 1, 10)), "3 tahun");
        assert_eq!(format_duration(date(2024, 1, 10), date(2024, 1, 20)), "kurang dari 1 bulan");
        assert_eq!(months_between(date(2024, 5, 1), date(2024, 1, 1)), 0);
    }

    #[test]
    fn test_add_months_clamps() {
        assert_eq!(add_months(date(2024, 1, 31), 1), Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("lima juta rupiah"), "Lima juta rupiah");
        assert_eq!(capitalize(""), "");
    }
}

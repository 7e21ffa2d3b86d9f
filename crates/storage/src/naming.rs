//! Collision-resistant blob names derived from client file names.
//!
//! A name is the client file stem, an underscore, the current UTC time in
//! 100-nanosecond ticks counted from 0001-01-01T00:00:00Z, and the file
//! extension: `photo.jpg` becomes `photo_638123456789000000.jpg`.
//! Two uploads of the same file name within one tick get the same name.

use chrono::{DateTime, Utc};

/// Ticks between 0001-01-01T00:00:00Z and the Unix epoch
const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;
const TICKS_PER_SECOND: i64 = 10_000_000;
const NANOS_PER_TICK: u32 = 100;

/// Current UTC time in ticks
pub fn utc_ticks() -> u64 {
    ticks_at(Utc::now())
}

pub fn ticks_at(time: DateTime<Utc>) -> u64 {
    let ticks = UNIX_EPOCH_TICKS
        + time.timestamp() * TICKS_PER_SECOND
        + i64::from(time.timestamp_subsec_nanos() / NANOS_PER_TICK);
    u64::try_from(ticks).unwrap_or(0)
}

/// Unique blob name for `file_name` using the current time
pub fn unique_blob_name(file_name: &str) -> String {
    unique_blob_name_at(file_name, utc_ticks())
}

/// Unique blob name for `file_name` at a fixed tick value
pub fn unique_blob_name_at(file_name: &str, ticks: u64) -> String {
    let (stem, extension) = split_file_name(file_name);
    match extension {
        Some(ext) => format!("{}_{}.{}", stem, ticks, ext),
        None => format!("{}_{}", stem, ticks),
    }
}

/// Splits a client file name into stem and extension (without the dot).
/// The extension is everything after the last dot, so `.env` has an empty stem.
/// Directory parts are dropped; clients on Windows may send `\` separated paths.
fn split_file_name(file_name: &str) -> (&str, Option<&str>) {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);

    match base.rfind('.') {
        Some(dot) if dot + 1 < base.len() => (&base[..dot], Some(&base[dot + 1..])),
        Some(dot) => (&base[..dot], None),
        None => (base, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn assert_pattern(name: &str, prefix: &str, suffix: &str) {
        let digits = name
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(suffix))
            .unwrap_or_else(|| panic!("'{}' does not match {}<digits>{}", name, prefix, suffix));
        assert!(!digits.is_empty());
        assert!(digits.bytes().all(|b| b.is_ascii_digit()), "non-digit in '{}'", name);
    }

    #[test]
    fn test_known_tick_value() {
        assert_eq!(
            unique_blob_name_at("a.png", 638123456789000000),
            "a_638123456789000000.png"
        );
    }

    #[test]
    fn test_keeps_extension() {
        assert_pattern(&unique_blob_name("photo.jpg"), "photo_", ".jpg");
    }

    #[test]
    fn test_no_extension_has_no_trailing_dot() {
        assert_pattern(&unique_blob_name("readme"), "readme_", "");
        assert_eq!(unique_blob_name_at("file.", 42), "file_42");
    }

    #[test]
    fn test_only_last_extension_is_split() {
        assert_eq!(unique_blob_name_at("backup.tar.gz", 7), "backup.tar_7.gz");
    }

    #[test]
    fn test_dot_leading_names_have_empty_stem() {
        assert_eq!(unique_blob_name_at(".env", 42), "_42.env");
        assert_eq!(unique_blob_name_at("config/.gitignore", 42), "_42.gitignore");
    }

    #[test]
    fn test_directories_are_dropped() {
        assert_eq!(unique_blob_name_at("docs/report.pdf", 1), "report_1.pdf");
        assert_eq!(unique_blob_name_at(r"C:\Users\me\cat.gif", 1), "cat_1.gif");
    }

    #[test]
    fn test_ticks_are_plain_ascii_digits() {
        // Display for integers never groups digits or localises them
        let name = unique_blob_name_at("x.bin", u64::MAX);
        assert_eq!(name, "x_18446744073709551615.bin");
        assert!(name.is_ascii());
        assert!(!name.contains(','));
    }

    #[test]
    fn test_ticks_at_matches_dotnet_epoch() {
        let unix_epoch = Utc.timestamp_opt(0, 0).unwrap();
        assert_eq!(ticks_at(unix_epoch), 621_355_968_000_000_000);

        let later = Utc.timestamp_opt(1, 250).unwrap();
        assert_eq!(ticks_at(later), 621_355_968_010_000_002);
    }

    #[test]
    fn test_ticks_are_current() {
        // 2023-01-01T00:00:00Z
        assert!(utc_ticks() > 638_080_992_000_000_000);
    }
}

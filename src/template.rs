//! Destination path templates.
//!
//! | Placeholder | Expansion |
//! |---|---|
//! | `%Y` | 4-digit year |
//! | `%y` | last 2 digits of year |
//! | `%m` | month, `01`..`12` |
//! | `%d` | day, `01`..`31` |
//! | `%H` | hour, `00`..`23` |
//! | `%M` | minute, `00`..`59` |
//! | `%S` | second, `00`..`59` |
//! | `%f` | original filename |
//! | `%g` | hex MD5 of the filename followed by the decimal size |
//!
//! Placeholders are replaced in a single pass, an expansion is never scanned
//! again. Any other `%` sequence is kept as is.

use chrono::{Datelike, Timelike};
use md5::{Digest, Md5};
use memchr::memchr;

use crate::utils::{push_2digits, PERCENT};

/// Expands `template` for one file.
///
/// ```
/// use chrono::NaiveDate;
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 9)
///     .and_then(|d| d.and_hms_opt(7, 5, 1))
///     .unwrap();
///
/// assert_eq!(
///     upload_files::template::expand("files/%Y/%m/%d_%H%M%S_%f", &now, "a.txt", 5),
///     "files/2024/03/09_070501_a.txt",
/// );
/// ```
pub fn expand<T>(template: &str, now: &T, filename: &str, size: u64) -> String
where
    T: Datelike + Timelike,
{
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len() + filename.len());
    let mut digest = None;
    let mut last = 0;

    while let Some(i) = memchr(PERCENT, &bytes[last..]).map(|n| last + n) {
        out.push_str(&template[last..i]);

        match bytes.get(i + 1) {
            Some(b'Y') => out.push_str(&format!("{:04}", now.year())),
            Some(b'y') => push_2digits(&mut out, now.year().rem_euclid(100) as u32),
            Some(b'm') => push_2digits(&mut out, now.month()),
            Some(b'd') => push_2digits(&mut out, now.day()),
            Some(b'H') => push_2digits(&mut out, now.hour()),
            Some(b'M') => push_2digits(&mut out, now.minute()),
            Some(b'S') => push_2digits(&mut out, now.second()),
            Some(b'f') => out.push_str(filename),
            Some(b'g') => out.push_str(digest.get_or_insert_with(|| hash(filename, size))),
            _ => {
                out.push('%');
                last = i + 1;
                continue;
            }
        }

        last = i + 2;
    }

    out.push_str(&template[last..]);
    out
}

/// The `%g` token.
pub fn hash(filename: &str, size: u64) -> String {
    let mut hasher = Md5::new();
    hasher.update(filename.as_bytes());
    hasher.update(size.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

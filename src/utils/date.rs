//! UTC datetime values and token-based formatting for permalink patterns.
//!
//! Provides a lightweight `DateTimeUtc` struct: enough to recognise front
//! matter dates and render them into path segments such as `2024/06/15`.
//!
//! # Format tokens
//!
//! | Token  | Output            |
//! |--------|-------------------|
//! | `YYYY` | `2024`            |
//! | `YY`   | `24`              |
//! | `MMMM` | `June`            |
//! | `MMM`  | `Jun`             |
//! | `MM`   | `06`              |
//! | `M`    | `6`               |
//! | `DD`   | `05`              |
//! | `D`    | `5`               |
//! | `HH`   | `14`              |
//! | `H`    | `14`              |
//! | `mm`   | `07`              |
//! | `m`    | `7`               |
//! | `ss`   | `09`              |
//! | `s`    | `9`               |
//! | `[..]` | literal text      |
//!
//! ```ignore
//! let dt = DateTimeUtc::parse("2024-06-15").unwrap();
//! assert_eq!(dt.format("YYYY/MM/DD"), "2024/06/15");
//! ```

use anyhow::{Result, bail};

/// Default date format applied to `Date` fields in patterns.
pub const DEFAULT_DATE_FORMAT: &str = "YYYY/MM/DD";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// UTC datetime without timezone complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Parse from "YYYY-MM-DD" or "YYYY-MM-DDTHH:MM:SSZ" format
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();

        // Minimum: "YYYY-MM-DD" (10 chars)
        if bytes.len() < 10 {
            return None;
        }

        let year = parse_u16(&bytes[0..4])?;
        if bytes[4] != b'-' {
            return None;
        }
        let month = parse_u8(&bytes[5..7])?;
        if bytes[7] != b'-' {
            return None;
        }
        let day = parse_u8(&bytes[8..10])?;

        // Time part (RFC3339, UTC only)
        let (hour, minute, second) = if bytes.len() == 20 && bytes[10] == b'T' && bytes[19] == b'Z'
        {
            if bytes[13] != b':' || bytes[16] != b':' {
                return None;
            }
            (
                parse_u8(&bytes[11..13])?,
                parse_u8(&bytes[14..16])?,
                parse_u8(&bytes[17..19])?,
            )
        } else if bytes.len() == 10 {
            (0, 0, 0)
        } else {
            return None;
        };

        let dt = Self::new(year, month, day, hour, minute, second);
        dt.validate().ok()?;
        Some(dt)
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Format as RFC 3339 (ISO 8601).
    ///
    /// Returns: `YYYY-MM-DDTHH:MM:SSZ`
    pub fn to_rfc3339(self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }

    /// Render with a token format string (see module docs).
    ///
    /// Unknown letters are copied through unchanged.
    pub fn format(&self, pattern: &str) -> String {
        let chars: Vec<char> = pattern.chars().collect();
        let mut out = String::with_capacity(pattern.len() + 8);
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == '[' {
                // Literal block up to the closing bracket
                match chars[i + 1..].iter().position(|&ch| ch == ']') {
                    Some(end) => {
                        out.extend(&chars[i + 1..i + 1 + end]);
                        i += end + 2;
                    }
                    None => {
                        out.extend(&chars[i..]);
                        i = chars.len();
                    }
                }
                continue;
            }

            let run = chars[i..].iter().take_while(|&&ch| ch == c).count();
            let (consumed, text) = self.render_token(c, run);
            match text {
                Some(text) => out.push_str(&text),
                None => out.extend(&chars[i..i + consumed]),
            }
            i += consumed;
        }

        out
    }

    /// Render the longest token of `c` that fits in `run` repeats.
    ///
    /// Returns how many characters were consumed and the rendered text, or
    /// `None` when `c` is not a token letter.
    fn render_token(&self, c: char, run: usize) -> (usize, Option<String>) {
        let month_name = MONTHS[usize::from(self.month.clamp(1, 12)) - 1];
        match c {
            'Y' if run >= 4 => (4, Some(format!("{:04}", self.year))),
            'Y' if run >= 2 => (2, Some(format!("{:02}", self.year % 100))),
            'M' if run >= 4 => (4, Some(month_name.to_owned())),
            'M' if run == 3 => (3, Some(month_name[..3].to_owned())),
            'M' if run == 2 => (2, Some(format!("{:02}", self.month))),
            'M' => (1, Some(self.month.to_string())),
            'D' if run >= 2 => (2, Some(format!("{:02}", self.day))),
            'D' => (1, Some(self.day.to_string())),
            'H' if run >= 2 => (2, Some(format!("{:02}", self.hour))),
            'H' => (1, Some(self.hour.to_string())),
            'm' if run >= 2 => (2, Some(format!("{:02}", self.minute))),
            'm' => (1, Some(self.minute.to_string())),
            's' if run >= 2 => (2, Some(format!("{:02}", self.second))),
            's' => (1, Some(self.second.to_string())),
            _ => (run, None),
        }
    }
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

//! Timestamp scalar.
//!
//! Encoded as RFC 3339 with `Z` for UTC and trimmed fractional seconds.
//! Decoding tries a fixed list of layouts in priority order and keeps the
//! first that parses.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::{datetime, format_description};

/// Point in time with a UTC offset.
///
/// The default is the zero timestamp `0001-01-01T00:00:00Z`, which is also
/// what an empty string decodes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(pub OffsetDateTime);

impl Timestamp {
    pub const ZERO: Self = Self(datetime!(0001-01-01 0:00 UTC));

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn to_rfc3339(&self) -> Result<String, time::error::Format> {
        self.0.format(&Rfc3339)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(value: OffsetDateTime) -> Self {
        Self(value)
    }
}

/// Accepted decode layouts, in the order they are tried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeLayout {
    /// `2006-01-02T15:04:05.000000Z07:00`
    Micro,
    /// `2006-01-02T15:04:05.000Z07:00`
    Millis,
    /// `2006-01-02T15:04:05Z07:00`
    Canonical,
    /// Any number of fractional digits.
    Nano,
}

impl TimeLayout {
    pub const PRIORITY: [TimeLayout; 4] = [Self::Micro, Self::Millis, Self::Canonical, Self::Nano];

    /// `text` must already carry a numeric offset.
    fn parse(self, text: &str) -> Result<OffsetDateTime, time::error::Parse> {
        match self {
            Self::Micro => {
                let format = format_description!(
                    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6][offset_hour sign:mandatory]:[offset_minute]"
                );
                OffsetDateTime::parse(text, &format)
            }
            Self::Millis => {
                let format = format_description!(
                    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3][offset_hour sign:mandatory]:[offset_minute]"
                );
                OffsetDateTime::parse(text, &format)
            }
            Self::Canonical => {
                let format = format_description!(
                    "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
                );
                OffsetDateTime::parse(text, &format)
            }
            Self::Nano => {
                let format = format_description!(
                    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory]:[offset_minute]"
                );
                OffsetDateTime::parse(text, &format)
            }
        }
    }
}

/// Parse a timestamp, trying each [`TimeLayout`] in priority order.
///
/// The empty string is the zero timestamp. On failure the error of the
/// last layout tried is returned.
pub fn parse_timestamp(text: &str) -> Result<Timestamp, time::error::Parse> {
    if text.is_empty() {
        return Ok(Timestamp::ZERO);
    }

    let normalized;
    let text = match text.strip_suffix(['Z', 'z']) {
        Some(head) => {
            normalized = format!("{head}+00:00");
            normalized.as_str()
        }
        None => text,
    };

    let mut last_err = None;
    for layout in TimeLayout::PRIORITY {
        match layout.parse(text) {
            Ok(t) => return Ok(Timestamp(t)),
            Err(e) => last_err = Some(e),
        }
    }
    match last_err {
        Some(e) => Err(e),
        None => Ok(Timestamp::ZERO),
    }
}

use std::ops::Deref;

use serde::Deserialize;
use thiserror::Error;

/// A duration written as whitespace separated parts with a unit suffix, e.g.
/// `1d 2h 3m 4s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::str::FromStr for Duration {
    type Err = InvalidDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .try_fold(std::time::Duration::ZERO, |out, part| {
                let unit = part.chars().last().ok_or(InvalidDurationError)?;
                let value = &part[..part.len() - unit.len_utf8()];
                if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(InvalidDurationError);
                }
                let value = value.parse::<u64>().map_err(|_| InvalidDurationError)?;
                let factor = match unit {
                    's' => 1,
                    'm' => 60,
                    'h' => 60 * 60,
                    'd' => 24 * 60 * 60,
                    _ => return Err(InvalidDurationError),
                };
                value
                    .checked_mul(factor)
                    .map(|secs| out + std::time::Duration::from_secs(secs))
                    .ok_or(InvalidDurationError)
            })
            .map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid duration")]
pub struct InvalidDurationError;

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration() {
        for (input, expected) in [
            ("13s", Some(13)),
            ("42m", Some(42 * 60)),
            ("7h", Some(7 * 60 * 60)),
            ("20d", Some(20 * 24 * 60 * 60)),
            ("", Some(0)),
            ("1d 2h 3m 4s", Some(((24 + 2) * 60 + 3) * 60 + 4)),
            ("10s 10s", Some(20)),
            ("s", None),
            ("xyz", None),
            ("7dd", None),
            ("-3s", None),
            ("3é", None),
        ] {
            let output = serde_json::from_value::<Duration>(input.into())
                .ok()
                .map(|x| x.as_secs());
            assert_eq!(output, expected, "input: {input}");
        }
    }
}

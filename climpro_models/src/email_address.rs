use std::{fmt, str::FromStr, sync::LazyLock};

use lettre::{address::AddressError, message::Mailbox};
use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Basic shape of an email address: something, `@`, something, `.`, something,
/// without any whitespace or additional `@`.
pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Email address entered by a submitter.
#[nutype(
    sanitize(with = |s: String| crate::sanitize(&s)),
    validate(regex = EMAIL_REGEX),
    derive(Debug, Clone, PartialEq, Eq, Hash, Deref, TryFrom, Display, Serialize, Deserialize)
)]
pub struct EmailAddress(String);

/// A deliverable mailbox with an optional display name, e.g.
/// `Climpro <info@climpro.be>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddressWithName(pub Mailbox);

impl TryFrom<&EmailAddress> for EmailAddressWithName {
    type Error = AddressError;

    fn try_from(value: &EmailAddress) -> Result<Self, Self::Error> {
        value
            .as_str()
            .parse()
            .map(|email| Self(Mailbox::new(None, email)))
    }
}

impl FromStr for EmailAddressWithName {
    type Err = <Mailbox as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for EmailAddressWithName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

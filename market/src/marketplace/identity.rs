//! Customer identity value types: names, email addresses and passwords.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::config::PASSWORD_MIN_LEN;
use crate::error::MarketError;

pub const NAME_FORMAT_HINT: &str = "Valid names consist of letters, spaces, apostrophes, \
and dashes, and start and finish with a letter.";

pub const EMAIL_FORMAT_HINT: &str = "Valid email addresses consist of two parts separated by '@', \
according to normal conventions; the domain part must contain at least 1 '.'";

pub const PASSWORD_FORMAT_HINT: &str = "Password must contain at least 1 upper, 1 lower, 1 digit, \
and 1 non-alphanumeric characters, and must be at least 8 characters long";

/// A person's display name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(String);

impl Name {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Name {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let invalid = || MarketError::Validation(format!("'{name}' is not a valid name"));

        let first = name.chars().next().ok_or_else(invalid)?;
        let last = name.chars().next_back().ok_or_else(invalid)?;
        if !first.is_alphabetic() || !last.is_alphabetic() {
            return Err(invalid());
        }

        // Separators may not repeat or sit next to each other.
        let parts_ok = name
            .split(['\'', '-', ' '])
            .all(|part| !part.is_empty() && part.chars().all(char::is_alphabetic));
        if !parts_ok {
            return Err(invalid());
        }
        Ok(Self(name.to_string()))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An email address. Comparison and hashing ignore ASCII case; display keeps it.
#[derive(Debug, Clone)]
pub struct EmailAddress {
    user: String,
    domain: String,
}

impl EmailAddress {
    fn is_valid_user(user: &str) -> bool {
        user.chars()
            .next_back()
            .is_some_and(char::is_alphanumeric)
            && user
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_'))
    }

    fn is_valid_domain(domain: &str) -> bool {
        let edge_ok = |c: Option<char>| c.is_some_and(|c| c != '.' && c != '-');
        if !edge_ok(domain.chars().next()) || !edge_ok(domain.chars().next_back()) {
            return false;
        }
        if !domain.contains('.') {
            return false;
        }
        if !domain
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '-'))
        {
            return false;
        }
        domain
            .rsplit('.')
            .next()
            .is_some_and(|tld| !tld.is_empty() && tld.chars().all(char::is_alphabetic))
    }

    /// Lower-cased form used as a lookup key.
    pub fn normalized(&self) -> String {
        format!(
            "{}@{}",
            self.user.to_lowercase(),
            self.domain.to_lowercase()
        )
    }
}

impl FromStr for EmailAddress {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || MarketError::Validation(format!("'{raw}' is not a valid email address"));

        let mut parts = raw.split('@');
        let (Some(user), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        let (user, domain) = (user.trim(), domain.trim());
        if !Self::is_valid_user(user) || !Self::is_valid_domain(domain) {
            return Err(invalid());
        }
        Ok(Self {
            user: user.to_string(),
            domain: domain.to_string(),
        })
    }
}

impl PartialEq for EmailAddress {
    fn eq(&self, other: &Self) -> bool {
        self.user.eq_ignore_ascii_case(&other.user)
            && self.domain.eq_ignore_ascii_case(&other.domain)
    }
}

impl Eq for EmailAddress {}

impl Hash for EmailAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.domain)
    }
}

impl Serialize for EmailAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

/// A customer password. Compared exactly; never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl FromStr for Password {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MarketError::Validation("password does not meet the rules".into());
        let trimmed = s.trim();

        if trimmed.chars().count() < PASSWORD_MIN_LEN || !trimmed.is_ascii() {
            return Err(invalid());
        }
        let has_upper = s.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = s.chars().any(|c| c.is_ascii_lowercase());
        let has_digit = s.chars().any(|c| c.is_ascii_digit());
        let has_symbol = s.chars().any(|c| !c.is_ascii_alphanumeric());
        if !(has_upper && has_lower && has_digit && has_symbol) {
            return Err(invalid());
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

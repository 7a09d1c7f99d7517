use serde::{Deserialize, Serialize};

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// First id handed out by the session registry.
///
/// Ids below this value are reserved so that a session number can never be
/// mistaken for a small protocol-level constant.
pub const FIRST_SESSION_ID: u64 = 1000;

/// Numeric identity of one connected client.
///
/// Ids are assigned monotonically by the registry and never reused within a
/// process lifetime. The same number also names the user's transcript file,
/// so a restarted server hands out ids whose history already exists on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_bare_number() {
        assert_eq!(SessionId(1001).to_string(), "1001");
    }

    #[test]
    fn parse_accepts_digits_only() {
        assert_eq!("1000".parse::<SessionId>().unwrap(), SessionId(1000));
        assert!("12ab".parse::<SessionId>().is_err());
        assert!("-5".parse::<SessionId>().is_err());
        assert!("".parse::<SessionId>().is_err());
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(SessionId(1000) < SessionId(1001));
    }
}

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Severity of a log record.
///
/// Variants are declared loudest-first so that the derived [`Ord`] matches
/// the total order `Error < Critical < Warning < Message < Info < Debug`
/// spec'd for the dispatcher's filter.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Level {
    Error = 0,
    Critical = 1,
    Warning = 2,
    Message = 3,
    Info = 4,
    Debug = 5,
}

impl Level {
    /// All levels, loudest first.
    pub const ALL: [Level; 6] = [
        Level::Error,
        Level::Critical,
        Level::Warning,
        Level::Message,
        Level::Info,
        Level::Debug,
    ];

    /// Lowercase name used in emitted lines (`error|critical|warning|message|info|debug`).
    pub fn name(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Critical => "critical",
            Level::Warning => "warning",
            Level::Message => "message",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }

    /// Whether a record at `self` is loud enough to pass a filter whose
    /// threshold is `min_level`, i.e. `self <= min_level` in severity order.
    pub fn passes(self, min_level: Level) -> bool {
        self as u8 <= min_level as u8
    }
}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned by [`FromStr`] for [`Level`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseLevelError(pub(crate) String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid level name: {:?}", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Level::Error),
            "critical" => Ok(Level::Critical),
            "warning" => Ok(Level::Warning),
            "message" => Ok(Level::Message),
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_order_is_loudest_first() {
        assert!(Level::Error < Level::Critical);
        assert!(Level::Critical < Level::Warning);
        assert!(Level::Warning < Level::Message);
        assert!(Level::Message < Level::Info);
        assert!(Level::Info < Level::Debug);
    }

    #[test]
    fn passes_is_le_in_severity_order() {
        // A CRITICAL record passes a WARNING-or-quieter filter...
        assert!(Level::Critical.passes(Level::Warning));
        // ...but a DEBUG record does not pass a MESSAGE filter.
        assert!(!Level::Debug.passes(Level::Message));
        // A record at exactly the threshold always passes.
        assert!(Level::Warning.passes(Level::Warning));
    }

    #[test]
    fn name_round_trips_through_from_str() {
        for level in Level::ALL {
            assert_eq!(Level::from_str(level.name()).unwrap(), level);
        }
    }

    #[test]
    fn from_str_rejects_unknown_names() {
        assert!(Level::from_str("trace").is_err());
    }
}

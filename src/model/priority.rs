use serde::{Deserialize, Serialize};

/// Task priority, used as the primary sort key.
///
/// `Undefined` is the default for tasks created without an explicit
/// priority; it ranks below every real priority but is otherwise a normal
/// value, never an error state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Hi,
    Md,
    Lo,
    #[default]
    Undefined,
}

impl Priority {
    /// Numeric rank for sorting: higher ranks sort first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Hi => 4,
            Priority::Md => 3,
            Priority::Lo => 2,
            Priority::Undefined => 1,
        }
    }

    /// The token used in command input and rendering. `Undefined` has no
    /// token and is omitted from rendered lines.
    pub fn token(self) -> &'static str {
        match self {
            Priority::Hi => "HI",
            Priority::Md => "MD",
            Priority::Lo => "LO",
            Priority::Undefined => "",
        }
    }

    /// Parse a priority token. Only the three explicit priorities have
    /// tokens; anything else is `None`.
    pub fn from_token(token: &str) -> Option<Priority> {
        match token {
            "HI" => Some(Priority::Hi),
            "MD" => Some(Priority::Md),
            "LO" => Some(Priority::Lo),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_orders_priorities() {
        assert!(Priority::Hi.rank() > Priority::Md.rank());
        assert!(Priority::Md.rank() > Priority::Lo.rank());
        assert!(Priority::Lo.rank() > Priority::Undefined.rank());
    }

    #[test]
    fn token_round_trip() {
        for p in [Priority::Hi, Priority::Md, Priority::Lo] {
            assert_eq!(Priority::from_token(p.token()), Some(p));
        }
        assert_eq!(Priority::from_token(""), None);
        assert_eq!(Priority::from_token("hi"), None);
    }

    #[test]
    fn default_is_undefined() {
        assert_eq!(Priority::default(), Priority::Undefined);
    }
}

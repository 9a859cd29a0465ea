//! Tag selection queries

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Which tags become versions.
///
/// Parsed from the revision argument: empty is `All`, `name` or `..name` is
/// `UpTo`, `name..` is `From` and `old..new` is `Between`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagQuery {
    /// Every tag plus the unreleased head
    #[default]
    All,
    /// The named tag and every older one
    UpTo(String),
    /// The unreleased head, the named tag and every newer one
    From(String),
    /// Both named tags and every tag between them
    Between(String, String),
}

impl TagQuery {
    /// Parse a query; surrounding whitespace is ignored
    pub fn parse(query: &str) -> Self {
        let query = query.trim();

        match query.split_once("..") {
            None if query.is_empty() => Self::All,
            None => Self::UpTo(query.to_string()),
            Some((old, new)) => match (old.trim(), new.trim()) {
                ("", "") => Self::All,
                ("", new) => Self::UpTo(new.to_string()),
                (old, "") => Self::From(old.to_string()),
                (old, new) => Self::Between(old.to_string(), new.to_string()),
            },
        }
    }

    /// Tag names the query refers to
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::All => Vec::new(),
            Self::UpTo(name) | Self::From(name) => vec![name.as_str()],
            Self::Between(old, new) => vec![old.as_str(), new.as_str()],
        }
    }

    /// Whether the unreleased head is part of the result
    pub fn includes_unreleased(&self) -> bool {
        matches!(self, Self::All | Self::From(_))
    }
}

impl FromStr for TagQuery {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for TagQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => Ok(()),
            Self::UpTo(name) => write!(f, "{}", name),
            Self::From(name) => write!(f, "{}..", name),
            Self::Between(old, new) => write!(f, "{}..{}", old, new),
        }
    }
}

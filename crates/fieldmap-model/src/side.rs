use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two schemas a field or table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The dataset already held by the backing store.
    Existing,
    /// The uploaded dataset being reconciled against it.
    New,
}

impl Side {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Existing => Self::New,
            Self::New => Self::Existing,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Existing => "existing",
            Self::New => "new",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A field as seen on screen: a name inside the active table of one side.
///
/// Two refs with the same name on different tables only differ while those
/// tables are active, since the session keeps a single active table per side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldRef {
    pub side: Side,
    pub table: String,
    pub name: String,
}

impl FieldRef {
    pub fn new(side: Side, table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            side,
            table: table.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}.{}", self.side, self.table, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_flips_side() {
        assert_eq!(Side::Existing.opposite(), Side::New);
        assert_eq!(Side::New.opposite(), Side::Existing);
    }

    #[test]
    fn field_ref_display() {
        let field = FieldRef::new(Side::New, "default", "full_name");
        assert_eq!(field.to_string(), "new:default.full_name");
    }
}

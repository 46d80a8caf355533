//! Scripted clicks for driving a session from the command line.
//!
//! A click is written `existing:<field>` or `new:<field>`; `e:` and `n:` are
//! accepted as short forms. Everything after the first colon is the field
//! name, so field names may themselves contain colons.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use fieldmap_map::ClickOutcome;
use fieldmap_model::Side;
use fieldmap_session::SessionState;

/// One scripted click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickSpec {
    pub side: Side,
    pub field: String,
}

impl ClickSpec {
    pub fn new(side: Side, field: impl Into<String>) -> Self {
        Self {
            side,
            field: field.into(),
        }
    }
}

impl fmt::Display for ClickSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.side, self.field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClickParseError {
    #[error("expected <side>:<field>, got '{0}'")]
    MissingSeparator(String),

    #[error("unknown side '{0}' (use existing, e, new or n)")]
    UnknownSide(String),

    #[error("missing field name in '{0}'")]
    EmptyField(String),
}

impl FromStr for ClickSpec {
    type Err = ClickParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (side, field) = raw
            .split_once(':')
            .ok_or_else(|| ClickParseError::MissingSeparator(raw.to_string()))?;
        let side = parse_side(side).ok_or_else(|| ClickParseError::UnknownSide(side.to_string()))?;
        if field.is_empty() {
            return Err(ClickParseError::EmptyField(raw.to_string()));
        }
        Ok(Self::new(side, field))
    }
}

/// Parses a side name, case-insensitively.
pub fn parse_side(raw: &str) -> Option<Side> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "existing" | "e" => Some(Side::Existing),
        "new" | "n" => Some(Side::New),
        _ => None,
    }
}

/// A click named a field the side's active table does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{side} side has no field '{field}' (available: {})", available.join(", "))]
pub struct UnknownField {
    pub side: Side,
    pub field: String,
    pub available: Vec<String>,
}

/// One replayed click and what it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickStep {
    pub click: ClickSpec,
    pub outcome: ClickOutcome,
}

/// Feeds `clicks` into `session` in order.
///
/// Every click is checked against the active table before anything is
/// applied, so a typo leaves the session untouched.
pub fn replay(session: &mut SessionState, clicks: &[ClickSpec]) -> Result<Vec<ClickStep>, UnknownField> {
    for click in clicks {
        let fields = session.fields(click.side);
        if !fields.iter().any(|f| f == &click.field) {
            return Err(UnknownField {
                side: click.side,
                field: click.field.clone(),
                available: fields.to_vec(),
            });
        }
    }

    Ok(clicks
        .iter()
        .map(|click| {
            let outcome = session.click(click.side, &click.field);
            debug!(click = %click, outcome = %describe_outcome(&outcome), "replayed click");
            ClickStep {
                click: click.clone(),
                outcome,
            }
        })
        .collect())
}

/// Short human-readable form of a click outcome.
pub fn describe_outcome(outcome: &ClickOutcome) -> String {
    match outcome {
        ClickOutcome::Armed(field) => format!("selected {field}"),
        ClickOutcome::Mapped { mapping, index } => {
            format!("mapped {} -> {} (#{})", mapping.existing, mapping.new, index + 1)
        }
        ClickOutcome::AlreadyMapped(mapping) => {
            format!("already mapped {} -> {}", mapping.existing, mapping.new)
        }
        ClickOutcome::Removed { mapping, index } => {
            format!("removed {} -> {} (#{})", mapping.existing, mapping.new, index + 1)
        }
        ClickOutcome::Discarded(field) => format!("cleared selection of {field}"),
    }
}

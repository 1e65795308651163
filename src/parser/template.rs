use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// What a positional field on a completion line holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Name,
    Description,
    MediaType,
    /// Metadata provider identifier (e.g. a TMDB id)
    Identifier,
}

/// Line format the prompt asks the completion provider to emit
///
/// Each variant fixes both the delimiter and the ordered slots, so one shared
/// routine can parse every shape the prompt has used:
///
/// | variant  | delimiter | example line                               |
/// |----------|-----------|--------------------------------------------|
/// | `dash2`  | `"- "`    | `1. The Office - TV`                       |
/// | `dash3`  | `"- "`    | `1. The Office - A mockumentary... - TV`   |
/// | `colon2` | `": "`    | `1. TV: 66732`                             |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    Dash2,
    #[default]
    Dash3,
    Colon2,
}

impl Template {
    pub fn delimiter(&self) -> &'static str {
        match self {
            Template::Dash2 | Template::Dash3 => "- ",
            Template::Colon2 => ": ",
        }
    }

    pub fn slots(&self) -> &'static [Slot] {
        match self {
            Template::Dash2 => &[Slot::Name, Slot::MediaType],
            Template::Dash3 => &[Slot::Name, Slot::Description, Slot::MediaType],
            Template::Colon2 => &[Slot::MediaType, Slot::Identifier],
        }
    }

    /// Number of fields a well-formed line splits into
    pub fn field_count(&self) -> usize {
        self.slots().len()
    }
}

impl Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Template::Dash2 => write!(f, "dash2"),
            Template::Dash3 => write!(f, "dash3"),
            Template::Colon2 => write!(f, "colon2"),
        }
    }
}

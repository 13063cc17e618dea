//! Academic month model.
//!
//! An academic session runs April through March. The variants of
//! [`AcademicMonth`] are declared in session order so that derived ordering,
//! sorting, and `BTreeMap` keys all follow the academic calendar rather than
//! the alphabet.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::EngineError;

/// One of the twelve months of an academic session, in session order.
///
/// # Example
///
/// ```
/// use school_fee_engine::models::AcademicMonth;
///
/// let month: AcademicMonth = "June".parse().unwrap();
/// assert_eq!(month, AcademicMonth::June);
/// assert!(AcademicMonth::December < AcademicMonth::January);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AcademicMonth {
    /// First month of the session.
    April,
    /// May.
    May,
    /// June.
    June,
    /// July.
    July,
    /// August.
    August,
    /// September.
    September,
    /// October.
    October,
    /// November.
    November,
    /// December.
    December,
    /// January.
    January,
    /// February.
    February,
    /// Last month of the session.
    March,
}

impl AcademicMonth {
    /// All twelve months in session order.
    pub const ALL: [AcademicMonth; 12] = [
        AcademicMonth::April,
        AcademicMonth::May,
        AcademicMonth::June,
        AcademicMonth::July,
        AcademicMonth::August,
        AcademicMonth::September,
        AcademicMonth::October,
        AcademicMonth::November,
        AcademicMonth::December,
        AcademicMonth::January,
        AcademicMonth::February,
        AcademicMonth::March,
    ];

    /// The English month name, as used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            AcademicMonth::April => "April",
            AcademicMonth::May => "May",
            AcademicMonth::June => "June",
            AcademicMonth::July => "July",
            AcademicMonth::August => "August",
            AcademicMonth::September => "September",
            AcademicMonth::October => "October",
            AcademicMonth::November => "November",
            AcademicMonth::December => "December",
            AcademicMonth::January => "January",
            AcademicMonth::February => "February",
            AcademicMonth::March => "March",
        }
    }

    /// Position within the session (April = 0, March = 11).
    pub fn academic_index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AcademicMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AcademicMonth {
    type Err = EngineError;

    /// Parses a full English month name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        AcademicMonth::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| EngineError::UnknownMonth {
                name: s.to_string(),
            })
    }
}

/// Deserializes through [`FromStr`], so wire input accepts the same spellings
/// as every other month parser.
impl<'de> Deserialize<'de> for AcademicMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Sort options offered by the workout list.

use std::fmt;
use std::str::FromStr;

/// Numeric workout attribute to order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Distance,
    Duration,
    /// Minutes per km (runs only)
    Pace,
    /// km/h (rides only)
    Speed,
    /// Steps per minute (runs only)
    Cadence,
    /// Elevation gain (rides only)
    Elevation,
    /// How often the workout was selected
    Clicks,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Distance => "distance",
            SortField::Duration => "duration",
            SortField::Pace => "pace",
            SortField::Speed => "speed",
            SortField::Cadence => "cadence",
            SortField::Elevation => "elevation",
            SortField::Clicks => "clicks",
        }
    }
}

impl FromStr for SortField {
    type Err = SortSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distance" => Ok(SortField::Distance),
            "duration" => Ok(SortField::Duration),
            "pace" => Ok(SortField::Pace),
            "speed" => Ok(SortField::Speed),
            "cadence" => Ok(SortField::Cadence),
            "elevation" => Ok(SortField::Elevation),
            "clicks" => Ok(SortField::Clicks),
            other => Err(SortSpecError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = SortSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascending" => Ok(SortDirection::Ascending),
            "descending" => Ok(SortDirection::Descending),
            other => Err(SortSpecError::UnknownDirection(other.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("ascending"),
            SortDirection::Descending => f.write_str("descending"),
        }
    }
}

/// A sort option as named by the list's dropdown, e.g. `distance_descending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl FromStr for SortSpec {
    type Err = SortSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s
            .split_once('_')
            .ok_or_else(|| SortSpecError::Malformed(s.to_string()))?;

        Ok(Self {
            field: field.parse()?,
            direction: direction.parse()?,
        })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.field.as_str(), self.direction)
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SortSpecError {
    #[error("Sort option must look like <field>_<direction>: {0}")]
    Malformed(String),

    #[error("Unknown sort field: {0}")]
    UnknownField(String),

    #[error("Unknown sort direction: {0}")]
    UnknownDirection(String),
}

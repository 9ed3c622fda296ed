//! Station and line types.

use std::fmt;

/// Error returned when parsing an invalid station id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {input:?}")]
pub struct InvalidStationId {
    input: String,
}

/// Identifier of a station in the network.
///
/// # Examples
///
/// ```
/// use schedule_server::domain::StationId;
///
/// let id = StationId::parse("18").unwrap();
/// assert_eq!(id, StationId(18));
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("Alger").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub u32);

impl StationId {
    /// Parse a station id from its decimal representation.
    ///
    /// Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        s.trim().parse().map(StationId).map_err(|_| InvalidStationId {
            input: s.to_string(),
        })
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a line (e.g. "Alger - Thenia").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub u32);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station, named in French and Arabic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: StationId,
    pub name_fr: String,
    pub name_ar: String,
    /// Owning line, if the station has been assigned one.
    pub line: Option<LineId>,
}

impl Station {
    pub fn new(id: StationId, name_fr: impl Into<String>, name_ar: impl Into<String>) -> Self {
        Self {
            id,
            name_fr: name_fr.into(),
            name_ar: name_ar.into(),
            line: None,
        }
    }

    pub fn with_line(mut self, line: LineId) -> Self {
        self.line = Some(line);
        self
    }
}

/// A commuter line grouping stations and routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub id: LineId,
    /// Display name, e.g. "Alger - Thenia"
    pub name: String,
    /// Short code, e.g. "AT"
    pub code: String,
}

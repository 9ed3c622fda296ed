//! Data transfer objects for web responses.

use serde::Serialize;

use crate::domain::{
    Badge, Itinerary, Leg, LegStop, Line, OperatingDays, RankedItinerary, Station, TransferPoint,
    format_wait,
};

/// A station in listings.
#[derive(Debug, Serialize)]
pub struct StationDto {
    pub id: u32,

    /// French name
    pub name_fr: String,

    /// Arabic name
    pub name_ar: String,

    /// Owning line id
    pub line: Option<u32>,

    /// Owning line name
    pub line_name: Option<String>,
}

/// A commuter line.
#[derive(Debug, Serialize)]
pub struct LineDto {
    pub id: u32,
    pub name: String,
    pub code: String,
}

/// A stop within a leg.
#[derive(Debug, Serialize)]
pub struct StopDto {
    /// Station name (French)
    pub station: String,

    /// Station name (Arabic)
    pub station_ar: String,

    /// Departure time, HH:MM
    pub time: String,
}

/// Where the rider changes trains.
#[derive(Debug, Serialize)]
pub struct TransferDto {
    pub station: String,
    pub station_ar: String,

    /// Arrival of the first train
    pub arrival: String,

    /// Departure of the second train
    pub departure: String,

    /// Wait, e.g. "25 min"
    pub wait_time: String,
}

/// One train of a connection.
#[derive(Debug, Serialize)]
pub struct LegDto {
    /// Train number
    pub train: String,
    pub from: String,
    pub to: String,
    pub departure: String,
    pub arrival: String,
    pub stops: Vec<StopDto>,
}

/// An itinerary in search results.
#[derive(Debug, Serialize)]
pub struct ItineraryDto {
    /// "direct" or "connection"
    #[serde(rename = "type")]
    pub kind: &'static str,

    /// "27", or "22 + 1025" for connections
    pub train_number: String,

    /// Route names joined with " / "
    pub route_name: String,

    /// Operating pattern of each train
    pub operating_days: Vec<OperatingDays>,

    /// Timetable display strings, joined with " / " for connections
    pub days_operational: String,

    pub departure_time: String,
    pub arrival_time: String,

    /// e.g. "1h35" or "45min"
    pub duration: String,

    /// Stops of a direct trip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stops: Option<Vec<StopDto>>,

    /// Transfer details, null for direct trips
    pub transfer: Option<TransferDto>,

    /// Both trains of a connection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legs: Option<Vec<LegDto>>,

    /// Ranking score, lower is better; absent when no time was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub badges: Vec<Badge>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl StationDto {
    /// Create from a station and its line, if known.
    pub fn from_station(station: &Station, line: Option<&Line>) -> Self {
        Self {
            id: station.id.0,
            name_fr: station.name_fr.clone(),
            name_ar: station.name_ar.clone(),
            line: station.line.map(|l| l.0),
            line_name: line.map(|l| l.name.clone()),
        }
    }
}

impl LineDto {
    pub fn from_line(line: &Line) -> Self {
        Self {
            id: line.id.0,
            name: line.name.clone(),
            code: line.code.clone(),
        }
    }
}

impl StopDto {
    pub fn from_stop(stop: &LegStop) -> Self {
        Self {
            station: stop.name_fr.clone(),
            station_ar: stop.name_ar.clone(),
            time: stop.time.to_string(),
        }
    }
}

impl TransferDto {
    pub fn from_transfer(transfer: &TransferPoint) -> Self {
        Self {
            station: transfer.name_fr.clone(),
            station_ar: transfer.name_ar.clone(),
            arrival: transfer.arrival.to_string(),
            departure: transfer.departure.to_string(),
            wait_time: format_wait(transfer.wait_minutes),
        }
    }
}

impl LegDto {
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            train: leg.train_number().to_string(),
            from: leg.origin().name_fr.clone(),
            to: leg.destination().name_fr.clone(),
            departure: leg.departure_time().to_string(),
            arrival: leg.arrival_time().to_string(),
            stops: stops(leg),
        }
    }
}

impl ItineraryDto {
    /// Create from a ranked itinerary.
    pub fn from_ranked(ranked: &RankedItinerary) -> Self {
        let itinerary = &ranked.itinerary;
        let legs = itinerary.legs();

        let (kind, stops, transfer, leg_dtos) = match itinerary {
            Itinerary::Direct(leg) => ("direct", Some(stops(leg)), None, None),
            Itinerary::Connection(c) => (
                "connection",
                None,
                Some(TransferDto::from_transfer(c.transfer())),
                Some(legs.iter().map(|leg| LegDto::from_leg(leg)).collect()),
            ),
        };

        Self {
            kind,
            train_number: itinerary.train_numbers(),
            route_name: itinerary.route_names(),
            operating_days: itinerary.operating_days(),
            days_operational: legs
                .iter()
                .map(|leg| leg.days_display())
                .collect::<Vec<_>>()
                .join(" / "),
            departure_time: itinerary.departure_time().to_string(),
            arrival_time: itinerary.arrival_time().to_string(),
            duration: itinerary.duration().to_string(),
            stops,
            transfer,
            legs: leg_dtos,
            score: ranked.score,
            badges: ranked.badges.clone(),
        }
    }
}

fn stops(leg: &Leg) -> Vec<StopDto> {
    leg.stops().iter().map(StopDto::from_stop).collect()
}

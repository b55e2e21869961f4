//! Geographic coordinate value type.
//!
//! # Responsibility
//! - Validate latitude/longitude input before it can reach the store.
//! - Parse and format the hemisphere-suffixed text used by listings.
//!
//! # Invariants
//! - A `Coordinate` always holds finite values with latitude in `[-90, 90]`
//!   and longitude in `[-180, 180]`.
//! - Deserialization runs the same validation as construction.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Decimal places used when formatting coordinates for display.
const DISPLAY_PRECISION: usize = 4;

static COORDINATE_PAIR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*([+-]?(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+))\s*°?\s*([NSns])?(?:\s*[,;]\s*|\s+)([+-]?(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+))\s*°?\s*([EWew])?\s*$",
    )
    .expect("valid coordinate pair regex")
});

/// Coordinate component an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
        }
    }
}

/// Validation error for coordinate input.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateError {
    /// Input did not parse as a finite number.
    NotANumber { axis: Axis, input: String },
    /// Latitude outside `[-90, 90]`.
    LatitudeOutOfRange(f64),
    /// Longitude outside `[-180, 180]`.
    LongitudeOutOfRange(f64),
    /// Combined `lat, lng` text did not match any accepted form.
    MalformedPair(String),
}

impl Display for CoordinateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotANumber { axis, input } => {
                write!(f, "{} is not a number: `{input}`", axis.as_str())
            }
            Self::LatitudeOutOfRange(value) => write!(
                f,
                "latitude must be between {MIN_LATITUDE} and {MAX_LATITUDE}, got {value}"
            ),
            Self::LongitudeOutOfRange(value) => write!(
                f,
                "longitude must be between {MIN_LONGITUDE} and {MAX_LONGITUDE}, got {value}"
            ),
            Self::MalformedPair(input) => write!(f, "malformed coordinate pair: `{input}`"),
        }
    }
}

impl Error for CoordinateError {}

/// Validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordinateRecord", into = "CoordinateRecord")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Creates a coordinate after range and finiteness checks.
    ///
    /// Latitude is checked before longitude, so an input violating both
    /// reports the latitude bound.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        check_axis(Axis::Latitude, lat)?;
        check_axis(Axis::Longitude, lng)?;
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Returns `[lat, lng]`, the vertex shape map renderers consume.
    pub fn to_pair(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

impl TryFrom<[f64; 2]> for Coordinate {
    type Error = CoordinateError;

    fn try_from(value: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(value[0], value[1])
    }
}

impl Display for Coordinate {
    /// Formats as `34.0489°N, 111.0937°W`.
    ///
    /// The hemisphere follows the rounded value, so values that round to
    /// zero print as `N`/`E`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let lat = round_for_display(self.lat);
        let lng = round_for_display(self.lng);
        let lat_hemisphere = if lat < 0.0 { 'S' } else { 'N' };
        let lng_hemisphere = if lng < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{:.prec$}°{lat_hemisphere}, {:.prec$}°{lng_hemisphere}",
            lat.abs(),
            lng.abs(),
            prec = DISPLAY_PRECISION
        )
    }
}

fn round_for_display(value: f64) -> f64 {
    let scale = 10f64.powi(DISPLAY_PRECISION as i32);
    (value * scale).round() / scale
}

/// Wire shape: flat `latitude` / `longitude` fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct CoordinateRecord {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<CoordinateRecord> for Coordinate {
    type Error = CoordinateError;

    fn try_from(value: CoordinateRecord) -> Result<Self, Self::Error> {
        Self::new(value.latitude, value.longitude)
    }
}

impl From<Coordinate> for CoordinateRecord {
    fn from(value: Coordinate) -> Self {
        Self {
            latitude: value.lat,
            longitude: value.lng,
        }
    }
}

/// Validates textual latitude/longitude input, as typed into a form.
///
/// # Errors
/// - `NotANumber` when either side is empty, non-numeric or non-finite.
/// - `LatitudeOutOfRange` / `LongitudeOutOfRange` naming the violated bound.
pub fn validate_coordinate(lat: &str, lng: &str) -> Result<Coordinate, CoordinateError> {
    let lat = parse_axis(Axis::Latitude, lat)?;
    let lng = parse_axis(Axis::Longitude, lng)?;
    Coordinate::new(lat, lng)
}

/// Parses a combined coordinate string.
///
/// Accepts signed decimals (`34.05, -111.09`) and hemisphere suffixes
/// (`34.0489°N, 111.0937°W`). A hemisphere letter cannot be combined with
/// an explicit sign.
pub fn parse_coordinate_pair(input: &str) -> Result<Coordinate, CoordinateError> {
    let captures = COORDINATE_PAIR_RE
        .captures(input)
        .ok_or_else(|| CoordinateError::MalformedPair(input.to_string()))?;

    let lat = apply_hemisphere(
        Axis::Latitude,
        &captures[1],
        captures.get(2).map(|m| m.as_str()),
        input,
    )?;
    let lng = apply_hemisphere(
        Axis::Longitude,
        &captures[3],
        captures.get(4).map(|m| m.as_str()),
        input,
    )?;

    Coordinate::new(lat, lng)
}

fn apply_hemisphere(
    axis: Axis,
    number: &str,
    hemisphere: Option<&str>,
    input: &str,
) -> Result<f64, CoordinateError> {
    let value = parse_axis(axis, number)?;
    let Some(hemisphere) = hemisphere else {
        return Ok(value);
    };
    if number.starts_with(['+', '-']) {
        return Err(CoordinateError::MalformedPair(input.to_string()));
    }
    match hemisphere.to_ascii_uppercase().as_str() {
        "S" | "W" => Ok(-value),
        _ => Ok(value),
    }
}

fn parse_axis(axis: Axis, input: &str) -> Result<f64, CoordinateError> {
    let trimmed = input.trim();
    let not_a_number = || CoordinateError::NotANumber {
        axis,
        input: trimmed.to_string(),
    };
    let value = trimmed.parse::<f64>().map_err(|_| not_a_number())?;
    if !value.is_finite() {
        return Err(not_a_number());
    }
    Ok(value)
}

fn check_axis(axis: Axis, value: f64) -> Result<(), CoordinateError> {
    if !value.is_finite() {
        return Err(CoordinateError::NotANumber {
            axis,
            input: value.to_string(),
        });
    }
    match axis {
        Axis::Latitude if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&value) => {
            Err(CoordinateError::LatitudeOutOfRange(value))
        }
        Axis::Longitude if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&value) => {
            Err(CoordinateError::LongitudeOutOfRange(value))
        }
        _ => Ok(()),
    }
}

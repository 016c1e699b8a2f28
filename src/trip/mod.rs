//! Travel distances and durations between pairs of points, as reported by
//! an external routing service with a route matrix interface.
//!
//! The service is reached through the [`Fetch`] capability, so the HTTP
//! client is always supplied by the caller. Each pair is looked up with the
//! credentials in turn, until one of them succeeds. When all credentials
//! fail, the pair gets `None` entries, and the rest of the batch proceeds.
use crate::authoring::*;
use crate::units::{Length, Time};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(feature = "http")]
mod client;
#[cfg(feature = "http")]
pub use client::{ClientConfig, RetryClient};

/// The default routing endpoint. The travel mode is appended
pub const ROUTE_MATRIX_URL: &str = "https://api.map.baidu.com/routematrix/v2";

/// Blocking retrieval of a JSON document
pub trait Fetch: Send + Sync {
    fn get_json(&self, url: &str) -> Result<serde_json::Value, Error>;
}

// Plain functions and closures can do the fetching, e.g. in tests
impl<F> Fetch for F
where
    F: Fn(&str) -> Result<serde_json::Value, Error> + Send + Sync,
{
    fn get_json(&self, url: &str) -> Result<serde_json::Value, Error> {
        self(url)
    }
}

/// The means of transport
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Default)]
pub enum TravelMode {
    #[default]
    Driving,
    Riding,
    Walking,
}

impl TravelMode {
    pub fn name(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Riding => "riding",
            TravelMode::Walking => "walking",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TravelMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driving" => Ok(TravelMode::Driving),
            "riding" => Ok(TravelMode::Riding),
            "walking" => Ok(TravelMode::Walking),
            _ => Err(Error::Invalid {
                what: "travel mode",
                value: s.to_string(),
                expected: "driving/riding/walking",
            }),
        }
    }
}

/// Settings for [`trip_distance`]
#[derive(Debug, Clone)]
pub struct TripOptions {
    pub mode: TravelMode,
    /// Unit of the distances
    pub unit: LengthUnit,
    /// Unit of the durations
    pub duration_unit: TimeUnit,
    /// Include the durations column
    pub return_duration: bool,
    /// Include the timestamps column
    pub return_timestamp: bool,
    /// Service credentials, in order of preference
    pub credentials: Vec<String>,
    pub endpoint: String,
}

impl Default for TripOptions {
    fn default() -> Self {
        TripOptions {
            mode: TravelMode::Driving,
            unit: LengthUnit::Meters,
            duration_unit: TimeUnit::Seconds,
            return_duration: false,
            return_timestamp: false,
            credentials: Vec::new(),
            endpoint: ROUTE_MATRIX_URL.to_string(),
        }
    }
}

impl TripOptions {
    // The request for one pair of (longitude, latitude) points
    fn url(&self, origin: Coor2D, destination: Coor2D, credential: &str) -> String {
        format!(
            "{}/{}?output=json&origins={},{}&destinations={},{}&ak={}",
            self.endpoint.trim_end_matches('/'),
            self.mode,
            origin.y(),
            origin.x(),
            destination.y(),
            destination.x(),
            credential
        )
    }
}

/// The result of [`trip_distance`]. The optional columns are present only
/// when requested in the [`TripOptions`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripTable {
    pub distances: Vec<Option<f64>>,
    pub durations: Option<Vec<Option<f64>>>,
    /// Seconds since the Unix epoch, at the time of the lookup
    pub timestamps: Option<Vec<Option<f64>>>,
}

// ----- T H E   S E R V I C E   C O N T R A C T ---------------------------------------

#[derive(Debug, Deserialize)]
struct RouteMatrix {
    status: serde_json::Value,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    distance: Measure,
    duration: Measure,
}

#[derive(Debug, Deserialize)]
struct Measure {
    value: f64,
}

// Distance (metres) and duration (seconds) from a response document
fn parse(document: serde_json::Value) -> Result<(f64, f64), Error> {
    let matrix: RouteMatrix = serde_json::from_value(document)
        .map_err(|e| Error::Http(format!("malformed response: {e}")))?;

    // Success is a status of 0, given as a number or as a string
    let success = match &matrix.status {
        serde_json::Value::Number(n) => n.as_i64() == Some(0),
        serde_json::Value::String(s) => s == "0",
        _ => false,
    };
    if !success {
        return Err(Error::Service {
            status: matrix.status.to_string(),
            message: matrix.message.unwrap_or_default(),
        });
    }

    let route = matrix
        .result
        .first()
        .ok_or_else(|| Error::Http("empty route matrix".to_string()))?;
    Ok((route.distance.value, route.duration.value))
}

// Look up one pair, trying the credentials in turn
fn lookup(
    fetch: &dyn Fetch,
    origin: Coor2D,
    destination: Coor2D,
    options: &TripOptions,
) -> Result<(f64, f64), Error> {
    let n = options.credentials.len();
    for (i, credential) in options.credentials.iter().enumerate() {
        let url = options.url(origin, destination, credential);
        match fetch.get_json(&url).and_then(parse) {
            Ok(route) => return Ok(route),
            Err(e) => {
                warn!("credential {} of {n}: {e}", i + 1);
                if i + 1 < n {
                    info!("failing over to credential {}", i + 2);
                }
            }
        }
    }
    Err(Error::Exhausted(format!(
        "{:?} -> {:?}",
        origin.xy(),
        destination.xy()
    )))
}

/// Travel distance (and optionally duration and time of lookup) between
/// corresponding points of `origins` and `destinations`, as reported by the
/// routing service reached through `fetch`.
///
/// The points are given as (longitude, latitude), in the coordinate system
/// expected by the service (`bd09` for the default endpoint). Pairs for which
/// all credentials fail get `None` entries. Only caller errors fail the call.
pub fn trip_distance(
    fetch: &dyn Fetch,
    origins: &dyn CoordinateSet,
    destinations: &dyn CoordinateSet,
    options: &TripOptions,
) -> Result<TripTable, Error> {
    if origins.len() != destinations.len() {
        return Err(Error::Shape(format!(
            "{} origins, but {} destinations",
            origins.len(),
            destinations.len()
        )));
    }
    if options.credentials.is_empty() {
        return Err(Error::MissingParam("credentials".to_string()));
    }

    let n = origins.len();
    let mut distances = Vec::with_capacity(n);
    let mut durations = Vec::with_capacity(n);
    let mut timestamps = Vec::with_capacity(n);

    for i in 0..n {
        let (origin, destination) = (origins.get_coord(i), destinations.get_coord(i));
        match lookup(fetch, origin, destination, options) {
            Ok((distance, duration)) => {
                distances.push(finite(Length::Meters(distance).to(options.unit)));
                durations.push(finite(Time::Seconds(duration).to(options.duration_unit)));
                timestamps.push(now());
            }
            Err(e) => {
                warn!("pair {i}: {e}");
                distances.push(None);
                durations.push(None);
                timestamps.push(None);
            }
        }
    }

    let found = distances.iter().filter(|d| d.is_some()).count();
    info!("{} trips: {found} of {n} found", options.mode);

    Ok(TripTable {
        distances,
        durations: options.return_duration.then_some(durations),
        timestamps: options.return_timestamp.then_some(timestamps),
    })
}

fn now() -> Option<f64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|t| t.as_secs_f64())
}

// ----- T E S T S ---------------------------------------------------------------------

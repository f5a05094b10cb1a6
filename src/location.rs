//! Location samples and the sampler that pushes them.
//!
//! The sampler is an outside collaborator: the platform location service on a device, or a
//! [`ReplaySampler`] replaying recorded samples. Consumers register a callback and hold the
//! returned [`Subscription`] for as long as they want updates. Dropping it releases the sampler.

use crate::{coords::GeoPoint, errors::GeofenceErr};
use chrono::{Duration, NaiveDateTime};
use log::{debug, info};
use serde::Deserialize;
use std::{
    cell::RefCell,
    collections::VecDeque,
    convert::TryFrom,
    io::BufRead,
};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// How hard the sampler should try for an accurate fix.
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumString, IntoStaticStr, EnumIter, Hash)]
pub enum Priority {
    /// GPS quality fixes, the most power hungry.
    #[strum(to_string = "high_accuracy", serialize = "high")]
    HighAccuracy,
    /// City block level accuracy.
    #[strum(to_string = "balanced_power_accuracy", serialize = "balanced")]
    BalancedPowerAccuracy,
    /// City level accuracy.
    #[strum(to_string = "low_power", serialize = "low")]
    LowPower,
    /// Only fixes requested by other clients.
    #[strum(to_string = "passive")]
    Passive,
}

impl Priority {
    /// Get a static string representation.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }
}

/// How often, and how accurately, a subscriber wants location updates.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LocationRequest {
    interval: Duration,
    fastest_interval: Duration,
    priority: Priority,
}

impl LocationRequest {
    /// Updates every 10 seconds.
    pub const DEFAULT_INTERVAL_SECS: i64 = 10;
    /// But never more often than every 5 seconds.
    pub const DEFAULT_FASTEST_INTERVAL_SECS: i64 = 5;

    /// Create a new request. The fastest interval must be positive and no longer than the
    /// interval.
    pub fn new(
        interval: Duration,
        fastest_interval: Duration,
        priority: Priority,
    ) -> Result<Self, GeofenceErr> {
        if fastest_interval <= Duration::zero() {
            return Err(GeofenceErr::InvalidRequest(
                "fastest interval must be positive",
            ));
        }
        if fastest_interval > interval {
            return Err(GeofenceErr::InvalidRequest(
                "fastest interval longer than the interval",
            ));
        }

        Ok(LocationRequest {
            interval,
            fastest_interval,
            priority,
        })
    }

    /// The desired time between updates.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The shortest time between updates the subscriber can handle.
    pub fn fastest_interval(&self) -> Duration {
        self.fastest_interval
    }

    /// The desired accuracy tier.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Whether an update arriving `since_last` after the previous one is too early.
    pub fn too_soon(&self, since_last: Duration) -> bool {
        since_last < self.fastest_interval
    }
}

impl Default for LocationRequest {
    fn default() -> Self {
        LocationRequest {
            interval: Duration::seconds(Self::DEFAULT_INTERVAL_SECS),
            fastest_interval: Duration::seconds(Self::DEFAULT_FASTEST_INTERVAL_SECS),
            priority: Priority::HighAccuracy,
        }
    }
}

/// One position estimate from the sampler.
#[derive(Clone, Copy, PartialEq, Debug, Deserialize)]
#[serde(try_from = "SampleRecord")]
pub struct LocationSample {
    /// Where the device is.
    pub point: GeoPoint,
    /// Horizontal accuracy radius in meters, when the sampler knows it.
    pub accuracy_m: Option<f32>,
    /// When the fix was taken, when the sampler knows it.
    pub time: Option<NaiveDateTime>,
}

// The flat layout used in recorded sample files.
#[derive(Deserialize)]
struct SampleRecord {
    lat: f64,
    lon: f64,
    #[serde(default)]
    accuracy_m: Option<f32>,
    #[serde(default)]
    time: Option<NaiveDateTime>,
}

impl TryFrom<SampleRecord> for LocationSample {
    type Error = GeofenceErr;

    fn try_from(record: SampleRecord) -> Result<Self, Self::Error> {
        Ok(LocationSample {
            point: GeoPoint::new(record.lat, record.lon)?,
            accuracy_m: record.accuracy_m,
            time: record.time,
        })
    }
}

impl From<GeoPoint> for LocationSample {
    fn from(point: GeoPoint) -> Self {
        LocationSample {
            point,
            accuracy_m: None,
            time: None,
        }
    }
}

impl LocationSample {
    /// Age of the fix at `now`, if the fix carries a time.
    pub fn age(&self, now: NaiveDateTime) -> Option<Duration> {
        self.time.map(|time| now - time)
    }
}

/// Parse one line of a recorded sample file. Blank lines and `#` comments yield `None`.
pub fn parse_sample_line(line: &str) -> Result<Option<LocationSample>, GeofenceErr> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(line)?))
}

/// Read every sample from a recorded sample file, one JSON object per line.
pub fn read_samples(reader: impl BufRead) -> Result<Vec<LocationSample>, GeofenceErr> {
    let mut samples = vec![];

    for line in reader.lines() {
        if let Some(sample) = parse_sample_line(&line?)? {
            samples.push(sample);
        }
    }

    Ok(samples)
}

/// The batch of samples delivered by one callback. The newest sample comes first.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct LocationResult {
    /// Samples in this batch.
    pub locations: Vec<LocationSample>,
}

impl LocationResult {
    /// The sample a consumer should act on, if the batch is not empty.
    pub fn first(&self) -> Option<&LocationSample> {
        self.locations.first()
    }
}

impl From<LocationSample> for LocationResult {
    fn from(sample: LocationSample) -> Self {
        LocationResult {
            locations: vec![sample],
        }
    }
}

/// Callback invoked by the sampler for every delivered batch.
pub type LocationCallback = Box<dyn FnMut(&LocationResult)>;

/// Handle identifying one registered callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u32);

/// A source of location updates.
pub trait LocationSampler {
    /// Register a callback for updates at the requested rate and accuracy.
    fn request_location_updates(
        &mut self,
        request: &LocationRequest,
        callback: LocationCallback,
    ) -> Result<SubscriptionId, GeofenceErr>;

    /// Stop delivering to the callback registered under `id`. Unknown ids are ignored.
    fn remove_location_updates(&mut self, id: SubscriptionId);
}

/// Scoped registration with a sampler. Updates stop when this is dropped.
pub struct Subscription<'a, S: LocationSampler> {
    sampler: &'a RefCell<S>,
    id: SubscriptionId,
}

impl<'a, S: LocationSampler> Subscription<'a, S> {
    /// The id the sampler assigned.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// The sampler this subscription is registered with.
    pub fn sampler(&self) -> &'a RefCell<S> {
        self.sampler
    }
}

impl<'a, S: LocationSampler> Drop for Subscription<'a, S> {
    fn drop(&mut self) {
        debug!("Releasing location subscription {:?}", self.id);
        self.sampler.borrow_mut().remove_location_updates(self.id);
    }
}

/// Register `callback` with `sampler` for as long as the returned guard lives.
///
/// The sampler must not be borrowed when the guard is dropped.
pub fn subscribe<'a, S: LocationSampler>(
    sampler: &'a RefCell<S>,
    request: &LocationRequest,
    callback: LocationCallback,
) -> Result<Subscription<'a, S>, GeofenceErr> {
    let id = sampler
        .borrow_mut()
        .request_location_updates(request, callback)?;

    info!(
        "Subscribed to location updates every {}s ({}s fastest), {}",
        request.interval().num_seconds(),
        request.fastest_interval().num_seconds(),
        request.priority().as_static_str()
    );

    Ok(Subscription { sampler, id })
}

/// A sampler that replays a fixed list of samples, one per call to `deliver_next`.
#[derive(Default)]
pub struct ReplaySampler {
    pending: VecDeque<LocationSample>,
    subscribers: Vec<(SubscriptionId, LocationCallback)>,
    next_id: u32,
}

impl ReplaySampler {
    /// Create a sampler that will replay `samples` in order.
    pub fn new(samples: impl IntoIterator<Item = LocationSample>) -> Self {
        ReplaySampler {
            pending: samples.into_iter().collect(),
            subscribers: vec![],
            next_id: 0,
        }
    }

    /// Push the next sample to every subscriber. Returns false when there was nothing to
    /// deliver, either because the samples ran out or because nobody is listening.
    pub fn deliver_next(&mut self) -> bool {
        if self.subscribers.is_empty() {
            return false;
        }

        let sample = match self.pending.pop_front() {
            Some(sample) => sample,
            None => return false,
        };

        debug!(
            "Delivering sample {} (accuracy {:?} m) to {} subscriber(s)",
            sample.point,
            sample.accuracy_m,
            self.subscribers.len()
        );

        let result = LocationResult::from(sample);
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&result);
        }

        true
    }

    /// Add samples to the end of the replay.
    pub fn queue(&mut self, samples: impl IntoIterator<Item = LocationSample>) {
        self.pending.extend(samples);
    }

    /// Number of samples not yet delivered.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Number of callbacks currently registered.
    pub fn active_subscriptions(&self) -> usize {
        self.subscribers.len()
    }
}

impl LocationSampler for ReplaySampler {
    fn request_location_updates(
        &mut self,
        _request: &LocationRequest,
        callback: LocationCallback,
    ) -> Result<SubscriptionId, GeofenceErr> {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, callback));

        Ok(id)
    }

    fn remove_location_updates(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/

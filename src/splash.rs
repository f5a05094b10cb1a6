//! The splash flow: wait for the location capability, classify samples against the campus
//! fence, and after a fixed delay either move on to the destination search or close.
//!
//! State is an immutable snapshot. [`update`] reads one snapshot and an event and returns the
//! next snapshot together with at most one effect for the driver to carry out. On error the
//! caller still holds the snapshot it passed in.

use crate::{
    errors::GeofenceErr,
    geofence::{GeofenceResult, Verdict},
    location::LocationResult,
    permission::PermissionStatus,
    site::TargetSite,
};
use chrono::Duration;
use log::{debug, info};

/// Time between the first classification and acting on it.
pub const DEFAULT_DELAY_MS: i64 = 3000;

/// How the splash flow ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The device is on campus, show the destination search.
    NavigateHome,
    /// The device is elsewhere, close the application.
    CloseApp,
}

/// Where the flow is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The location capability has not been answered yet.
    AwaitingPermission,
    /// The location capability was refused. Final.
    Denied,
    /// Subscribed, no sample yet.
    Locating,
    /// At least one sample classified, the delay is running.
    Classified,
    /// Done. Final.
    Finished(Exit),
}

/// Inputs to the flow.
#[derive(Debug, Clone, PartialEq)]
pub enum SplashEvent {
    /// The answer to the location capability request.
    Permission(PermissionStatus),
    /// A batch from the location sampler.
    Location(LocationResult),
    /// A delay armed with this generation ran out.
    DelayElapsed(u32),
}

/// Work for the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashEffect {
    /// Start location updates.
    SubscribeLocation,
    /// Stop location updates, the flow will not use them again.
    ReleaseLocation,
    /// Send `DelayElapsed(generation)` after `delay`. Earlier delays are void.
    ArmDelay {
        /// Tag to echo back.
        generation: u32,
        /// How long to wait.
        delay: Duration,
    },
    /// Stop location updates and leave the splash screen.
    Exit(Exit),
}

/// Snapshot of the splash flow.
#[derive(Debug, Clone, PartialEq)]
pub struct SplashState {
    phase: Phase,
    latest: Option<GeofenceResult>,
    generation: u32,
    delay: Duration,
    message: String,
    notice: Option<String>,
}

impl SplashState {
    /// Initial state with a custom delay.
    pub fn with_delay(delay: Duration) -> Self {
        SplashState {
            phase: Phase::AwaitingPermission,
            latest: None,
            generation: 0,
            delay,
            message: String::new(),
            notice: None,
        }
    }

    /// Where the flow is.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The most recent classification.
    pub fn latest(&self) -> Option<&GeofenceResult> {
        self.latest.as_ref()
    }

    /// The status line under the logo.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Transient message raised by the last update.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Generation of the delay currently armed, zero when none ever was.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether the flow has reached a final phase.
    pub fn is_done(&self) -> bool {
        match self.phase {
            Phase::Denied | Phase::Finished(_) => true,
            _ => false,
        }
    }
}

impl Default for SplashState {
    fn default() -> Self {
        SplashState::with_delay(Duration::milliseconds(DEFAULT_DELAY_MS))
    }
}

/// Advance the flow by one event.
pub fn update(
    state: &SplashState,
    site: &TargetSite,
    event: SplashEvent,
) -> Result<(SplashState, Option<SplashEffect>), GeofenceErr> {
    if !site.radius.is_valid() {
        return Err(GeofenceErr::InvalidRadius(site.radius.meters()));
    }

    let mut next = SplashState {
        notice: None,
        ..state.clone()
    };

    if next.is_done() {
        debug!("Splash finished, ignoring {:?}", event);
        return Ok((next, None));
    }

    let effect = match event {
        SplashEvent::Permission(PermissionStatus::Denied) => {
            info!("Location permission denied");
            let subscribed = match next.phase {
                Phase::Locating | Phase::Classified => true,
                _ => false,
            };
            next.phase = Phase::Denied;
            next.message = "Location permission denied".to_owned();

            if subscribed {
                Some(SplashEffect::ReleaseLocation)
            } else {
                None
            }
        }
        SplashEvent::Permission(PermissionStatus::Granted) => {
            if next.phase == Phase::AwaitingPermission {
                info!("Location permission granted, locating");
                next.phase = Phase::Locating;
                Some(SplashEffect::SubscribeLocation)
            } else {
                None
            }
        }
        SplashEvent::Location(result) => {
            let sample = match (next.phase, result.first()) {
                (Phase::Locating, Some(sample)) | (Phase::Classified, Some(sample)) => *sample,
                _ => return Ok((next, None)),
            };

            let classified = site.evaluate(sample.point)?;
            debug!(
                "Sample {} is {:.1} m from {}: {:?}",
                classified.sample, classified.distance_m, site.name, classified.verdict
            );

            let previous = next.latest.map(|res| res.verdict);
            next.latest = Some(classified);
            next.message = classified.status_message(site);
            next.phase = Phase::Classified;

            if previous != Some(classified.verdict) {
                next.generation += 1;
                Some(SplashEffect::ArmDelay {
                    generation: next.generation,
                    delay: next.delay,
                })
            } else {
                None
            }
        }
        SplashEvent::DelayElapsed(generation) => {
            let current = next.phase == Phase::Classified && generation == next.generation;
            match next.latest {
                Some(result) if current => {
                    let exit = match result.verdict {
                        Verdict::Inside => Exit::NavigateHome,
                        Verdict::Outside => {
                            next.notice = Some("Closing the app...".to_owned());
                            Exit::CloseApp
                        }
                    };
                    info!("Leaving splash: {:?}", exit);
                    next.phase = Phase::Finished(exit);
                    Some(SplashEffect::Exit(exit))
                }
                _ => {
                    debug!("Ignoring stale delay {}", generation);
                    None
                }
            }
        }
    };

    Ok((next, effect))
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    use crate::{coords::GeoPoint, location::LocationSample, site::IITM_RP};

    fn on_campus() -> SplashEvent {
        SplashEvent::Location(LocationSample::from(IITM_RP.location).into())
    }

    fn off_campus() -> SplashEvent {
        let far = GeoPoint::new(21.7179202, 73.0264064).unwrap();
        SplashEvent::Location(LocationSample::from(far).into())
    }

    fn step(state: SplashState, event: SplashEvent) -> (SplashState, Option<SplashEffect>) {
        update(&state, &IITM_RP, event).unwrap()
    }

    fn granted() -> SplashState {
        let (state, effect) = step(
            SplashState::default(),
            SplashEvent::Permission(PermissionStatus::Granted),
        );
        assert_eq!(effect, Some(SplashEffect::SubscribeLocation));
        assert_eq!(state.phase(), Phase::Locating);
        state
    }

    #[test]
    fn test_initial_state() {
        let state = SplashState::default();

        assert_eq!(state.phase(), Phase::AwaitingPermission);
        assert_eq!(state.message(), "");
        assert!(state.latest().is_none());
        assert!(!state.is_done());
    }

    #[test]
    fn test_denied_is_final() {
        let (state, effect) = step(
            SplashState::default(),
            SplashEvent::Permission(PermissionStatus::Denied),
        );

        assert_eq!(effect, None);
        assert_eq!(state.phase(), Phase::Denied);
        assert_eq!(state.message(), "Location permission denied");
        assert!(state.is_done());

        let (state, effect) = step(state, SplashEvent::Permission(PermissionStatus::Granted));
        assert_eq!(effect, None);
        assert_eq!(state.phase(), Phase::Denied);

        let (state, effect) = step(state, on_campus());
        assert_eq!(effect, None);
        assert!(state.latest().is_none());
    }

    #[test]
    fn test_revoked_permission_releases_location() {
        let (state, _) = step(granted(), on_campus());
        let (state, effect) = step(state, SplashEvent::Permission(PermissionStatus::Denied));

        assert_eq!(effect, Some(SplashEffect::ReleaseLocation));
        assert_eq!(state.phase(), Phase::Denied);
        assert_eq!(state.message(), "Location permission denied");

        let (state, effect) = step(granted(), SplashEvent::Permission(PermissionStatus::Denied));
        assert_eq!(effect, Some(SplashEffect::ReleaseLocation));

        // Stale delay from before the revocation.
        let (state, effect) = step(state, SplashEvent::DelayElapsed(1));
        assert_eq!(effect, None);
        assert_eq!(state.phase(), Phase::Denied);
    }

    #[test]
    fn test_bad_site_leaves_snapshot_untouched() {
        let broken = TargetSite {
            radius: crate::site::Radius::new(0.0),
            ..IITM_RP
        };
        let state = granted();

        match update(&state, &broken, on_campus()) {
            Err(GeofenceErr::InvalidRadius(r)) => assert_eq!(r, 0.0),
            other => panic!("unexpected result: {:?}", other),
        }

        assert_eq!(state.phase(), Phase::Locating);
        assert!(state.latest().is_none());

        let (state, effect) = step(state, on_campus());
        assert_eq!(state.phase(), Phase::Classified);
        assert!(effect.is_some());
    }

    #[test]
    fn test_on_campus_navigates_after_delay() {
        let (state, effect) = step(granted(), on_campus());

        assert_eq!(state.message(), "You are at IITM RP");
        assert_eq!(
            effect,
            Some(SplashEffect::ArmDelay {
                generation: 1,
                delay: Duration::milliseconds(3000),
            })
        );

        let (state, effect) = step(state, SplashEvent::DelayElapsed(1));
        assert_eq!(effect, Some(SplashEffect::Exit(Exit::NavigateHome)));
        assert_eq!(state.phase(), Phase::Finished(Exit::NavigateHome));
        assert_eq!(state.notice(), None);
    }

    #[test]
    fn test_off_campus_closes_after_delay() {
        let (state, _) = step(granted(), off_campus());
        assert_eq!(state.message(), "The location is not supported");

        let (state, effect) = step(state, SplashEvent::DelayElapsed(1));
        assert_eq!(effect, Some(SplashEffect::Exit(Exit::CloseApp)));
        assert_eq!(state.notice(), Some("Closing the app..."));
        assert!(state.is_done());
    }

    #[test]
    fn test_same_verdict_does_not_rearm() {
        let (state, _) = step(granted(), on_campus());
        let (state, effect) = step(state, on_campus());

        assert_eq!(effect, None);
        assert_eq!(state.generation(), 1);
    }

    #[test]
    fn test_verdict_change_rearms_and_voids_old_delay() {
        let (state, _) = step(granted(), off_campus());
        let (state, effect) = step(state, on_campus());

        assert_eq!(
            effect,
            Some(SplashEffect::ArmDelay {
                generation: 2,
                delay: Duration::milliseconds(3000),
            })
        );

        let (state, effect) = step(state, SplashEvent::DelayElapsed(1));
        assert_eq!(effect, None);
        assert_eq!(state.phase(), Phase::Classified);

        let (state, effect) = step(state, SplashEvent::DelayElapsed(2));
        assert_eq!(effect, Some(SplashEffect::Exit(Exit::NavigateHome)));
        assert!(state.is_done());
    }

    #[test]
    fn test_latest_sample_wins() {
        let (state, _) = step(granted(), on_campus());
        let (state, _) = step(state, off_campus());

        let latest = state.latest().unwrap();
        assert_eq!(latest.verdict, Verdict::Outside);
        assert_eq!(state.message(), "The location is not supported");
    }

    #[test]
    fn test_empty_batch_and_early_delay_ignored() {
        let (state, effect) = step(granted(), SplashEvent::Location(LocationResult::default()));
        assert_eq!(effect, None);
        assert_eq!(state.phase(), Phase::Locating);

        let (state, effect) = step(state, SplashEvent::DelayElapsed(0));
        assert_eq!(effect, None);
        assert_eq!(state.phase(), Phase::Locating);
    }

    #[test]
    fn test_no_sample_means_no_decision() {
        let state = granted();

        assert_eq!(state.message(), "");
        assert!(!state.is_done());
    }

    #[test]
    fn test_events_after_exit_ignored() {
        let (state, _) = step(granted(), on_campus());
        let (state, _) = step(state, SplashEvent::DelayElapsed(1));

        let (state, effect) = step(state, off_campus());
        assert_eq!(effect, None);
        assert_eq!(state.phase(), Phase::Finished(Exit::NavigateHome));
        assert_eq!(state.latest().unwrap().verdict, Verdict::Inside);
    }

    #[test]
    fn test_custom_delay() {
        let state = SplashState::with_delay(Duration::milliseconds(10));
        let (state, _) = step(state, SplashEvent::Permission(PermissionStatus::Granted));
        let (_, effect) = step(state, on_campus());

        assert_eq!(
            effect,
            Some(SplashEffect::ArmDelay {
                generation: 1,
                delay: Duration::milliseconds(10),
            })
        );
    }
}

//! cgsplash - Replay recorded location samples through the campus splash screen.
//!
//! Samples are delivered in virtual time, one every fastest interval of the location request.
//! The delay before acting on a classification is waited out for real.

use anyhow::{bail, Context, Error};
use campus_gate::{
    read_samples, splash, subscribe, Capability, CommonCmdLineArgs, Exit, GeofenceErr, HomeState,
    LocationRequest, LocationResult, LocationSample, PermissionGate, Phase, ReplaySampler,
    SplashEffect, SplashEvent, SplashState, StaticPermissions,
};
use chrono::Duration;
use clap::Arg;
use log::info;
use std::{
    cell::RefCell,
    collections::VecDeque,
    fs::File,
    io::{self, BufReader},
    sync::mpsc,
    thread,
};

const EXIT_NAVIGATE: i32 = 0;
const EXIT_CLOSE: i32 = 2;
const EXIT_DENIED: i32 = 3;
const EXIT_NO_DECISION: i32 = 4;

fn main() {
    env_logger::init();

    match run() {
        Ok(code) => ::std::process::exit(code),
        Err(ref e) => {
            println!("error: {}", e);

            for cause in e.chain().skip(1) {
                println!("caused by: {}", cause);
            }

            ::std::process::exit(1);
        }
    }
}

fn run() -> Result<i32, Error> {
    let app = CommonCmdLineArgs::new_app(
        "cgsplash",
        "Replay location samples through the campus splash screen.",
    )
    .arg(
        Arg::with_name("samples")
            .short("s")
            .long("samples")
            .takes_value(true)
            .help("File of recorded samples, one JSON object per line.")
            .long_help(concat!(
                "File of recorded samples, one JSON object per line, e.g. ",
                "{\"lat\": 21.7159, \"lon\": 73.0264, \"accuracy_m\": 5.0}. ",
                "Reads standard input when not given."
            )),
    )
    .arg(
        Arg::with_name("deny-location")
            .long("deny-location")
            .help("Refuse the location capability."),
    )
    .arg(
        Arg::with_name("delay-ms")
            .long("delay-ms")
            .takes_value(true)
            .default_value("3000")
            .help("Milliseconds to wait before acting on a classification."),
    )
    .after_help(concat!(
        "Exit status is 0 when the device is on campus, 2 when it is not, 3 when the ",
        "location capability is refused and 4 when the samples run out first."
    ));

    let (common_args, matches) = CommonCmdLineArgs::matches(app)?;
    let site = *common_args.site();

    let delay_ms: i64 = matches
        .value_of("delay-ms")
        .unwrap_or("3000")
        .parse()
        .context("Invalid delay-ms, not parseable as an integer.")?;
    if delay_ms < 0 {
        bail!("Invalid delay-ms, it must be 0 or a positive value!");
    }

    let mut permissions = StaticPermissions::new().answering(
        Capability::FineLocation,
        (!matches.is_present("deny-location")).into(),
    );

    let request = LocationRequest::default();
    let sampler = RefCell::new(ReplaySampler::default());
    let (tx, rx) = mpsc::channel::<LocationResult>();
    let mut subscription = None;

    let mut state = SplashState::with_delay(Duration::milliseconds(delay_ms));
    let mut pending = VecDeque::new();
    pending.push_back(SplashEvent::Permission(
        permissions.request(Capability::FineLocation),
    ));

    let mut clock = Duration::zero();
    let mut next_sample_at = Duration::zero();
    let mut timer: Option<(Duration, u32)> = None;

    loop {
        if let Some(event) = pending.pop_front() {
            let previous_message = state.message().to_owned();
            let (next, effect) = splash::update(&state, &site, event)?;
            state = next;

            if state.message() != previous_message {
                println!("{}", state.message());
            }
            if let Some(notice) = state.notice() {
                println!("{}", notice);
            }

            match effect {
                Some(SplashEffect::SubscribeLocation) => {
                    let samples = load_samples(matches.value_of("samples"))?;
                    sampler.borrow_mut().queue(samples);

                    let tx = tx.clone();
                    subscription = Some(subscribe(
                        &sampler,
                        &request,
                        Box::new(move |result: &LocationResult| {
                            // The receiver outlives the subscription.
                            let _ = tx.send(result.clone());
                        }),
                    )?);
                }
                Some(SplashEffect::ReleaseLocation) => {
                    drop(subscription.take());
                }
                Some(SplashEffect::ArmDelay { generation, delay }) => {
                    timer = Some((clock + delay, generation));
                }
                Some(SplashEffect::Exit(exit)) => {
                    drop(subscription.take());
                    return Ok(leave(exit, &common_args));
                }
                None => {}
            }

            if state.phase() == Phase::Denied {
                return Ok(EXIT_DENIED);
            }

            continue;
        }

        // Nothing queued, so advance virtual time to the delay or the next sample.
        let samples_left = sampler.borrow().remaining() > 0;
        match timer {
            Some((deadline, generation)) if deadline <= next_sample_at || !samples_left => {
                thread::sleep((deadline - clock).to_std().unwrap_or_default());
                clock = deadline;
                timer = None;
                pending.push_back(SplashEvent::DelayElapsed(generation));
            }
            _ => {
                if !sampler.borrow_mut().deliver_next() {
                    info!("Samples exhausted after {}s", clock.num_seconds());
                    println!("No more location samples, no decision.");
                    return Ok(EXIT_NO_DECISION);
                }
                clock = next_sample_at;
                next_sample_at = clock + request.fastest_interval();
                pending.extend(rx.try_iter().map(SplashEvent::Location));
            }
        }
    }
}

fn load_samples(path: Option<&str>) -> Result<Vec<LocationSample>, Error> {
    let samples = match path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Unable to open {}", path))?;
            read_samples(BufReader::new(file))
                .with_context(|| format!("Unable to read samples from {}", path))?
        }
        None => {
            let stdin = io::stdin();
            let handle = stdin.lock();
            read_samples(handle).context("Unable to read samples from standard input")?
        }
    };

    if samples.is_empty() {
        return Err(Error::new(GeofenceErr::NotEnoughData)
            .context("No location samples in the input"));
    }

    Ok(samples)
}

fn leave(exit: Exit, common_args: &CommonCmdLineArgs) -> i32 {
    match exit {
        Exit::CloseApp => EXIT_CLOSE,
        Exit::NavigateHome => {
            let home = HomeState::new(common_args.language());

            println!();
            println!("{}", home.title());
            println!("[ {} ]", home.search_hint());
            for entry in home.displayed() {
                println!("  {}", entry.label);
            }

            EXIT_NAVIGATE
        }
    }
}

//! cgfind - Search the campus destinations by text or by a simulated voice query.

use anyhow::{Context, Error};
use campus_gate::{
    ask_speech_input, home, CannedRecognizer, Capability, CommonCmdLineArgs, HomeEvent, HomeState,
    PermissionStatus, RecognitionError, StaticPermissions,
};
use clap::{Arg, ArgMatches};

fn main() {
    env_logger::init();

    if let Err(ref e) = run() {
        println!("error: {}", e);

        for cause in e.chain().skip(1) {
            println!("caused by: {}", cause);
        }

        ::std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let app = CommonCmdLineArgs::new_app("cgfind", "Search the campus destinations.")
        .arg(
            Arg::with_name("query")
                .short("q")
                .long("query")
                .takes_value(true)
                .help("Text typed into the search box."),
        )
        .arg(
            Arg::with_name("voice")
                .long("voice")
                .takes_value(true)
                .conflicts_with_all(&["voice-error", "no-recognizer"])
                .help("Simulate a voice search that hears this text."),
        )
        .arg(
            Arg::with_name("voice-error")
                .long("voice-error")
                .takes_value(true)
                .conflicts_with("no-recognizer")
                .help("Simulate a voice search that fails with this error code.")
                .long_help(concat!(
                    "Simulate a voice search that fails with this error code: 1 network ",
                    "timeout, 2 network, 3 audio, 4 server, 5 client, 6 speech timeout, ",
                    "7 no match, 8 busy, 9 insufficient permissions."
                )),
        )
        .arg(
            Arg::with_name("no-recognizer")
                .long("no-recognizer")
                .help("Simulate a voice search on a device without speech recognition."),
        )
        .arg(
            Arg::with_name("deny-audio")
                .long("deny-audio")
                .help("Refuse the record-audio capability when voice search asks for it."),
        );

    let (common_args, matches) = CommonCmdLineArgs::matches(app)?;

    let mut state = HomeState::new(common_args.language());

    if let Some(query) = matches.value_of("query") {
        state = home::update(state, HomeEvent::QueryChanged(query.to_owned()));
    }

    if let Some(mut recognizer) = simulated_recognizer(&matches)? {
        let mut permissions = StaticPermissions::new().answering(
            Capability::RecordAudio,
            PermissionStatus::from(!matches.is_present("deny-audio")),
        );

        let outcome = ask_speech_input(&mut permissions, &mut recognizer, state.language());
        state = home::update(state, HomeEvent::Voice(outcome));
    }

    println!("{}", state.title());
    if state.query().is_empty() {
        println!("[ {} ]", state.search_hint());
    } else {
        println!("[ {} ]", state.query());
    }
    if let Some(notice) = state.notice() {
        println!("{}", notice);
    }
    for entry in state.displayed() {
        println!("  {}", entry.label);
    }

    Ok(())
}

fn simulated_recognizer(matches: &ArgMatches) -> Result<Option<CannedRecognizer>, Error> {
    if let Some(text) = matches.value_of("voice") {
        return Ok(Some(CannedRecognizer::hearing(vec![text])));
    }

    if let Some(code) = matches.value_of("voice-error") {
        let code: i32 = code
            .parse()
            .context("Invalid voice-error, not parseable as an integer.")?;
        return Ok(Some(CannedRecognizer::failing(RecognitionError::from_code(
            code,
        ))));
    }

    if matches.is_present("no-recognizer") {
        return Ok(Some(CannedRecognizer::missing()));
    }

    Ok(None)
}

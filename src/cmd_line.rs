//! Command line options that are used across applications.

use std::str::FromStr;

use clap::{App, Arg, ArgMatches};

use crate::{
    coords::GeoPoint,
    destinations::Language,
    errors::GeofenceErr,
    site::{Radius, TargetSite, IITM_RP},
};

/// Struct to package up command line arguments.
#[derive(Clone, Debug)]
pub struct CommonCmdLineArgs {
    // The fence, the campus unless moved with --lat/--lon/--radius
    site: TargetSite,
    // Language for headings and the destination list
    language: Language,
}

impl<'a, 'b> CommonCmdLineArgs {
    const DEFAULT_LANGUAGE: &'static str = "English";

    /// Create a new set of args.
    pub fn new_app(app_name: &'static str, about: &'static str) -> App<'a, 'b> {
        App::new(app_name)
            .author("Ryan Leach <clumsycodemonkey@gmail.com>")
            .about(about)
            .version(clap::crate_version!())
            .arg(
                Arg::with_name("lat")
                    .long("lat")
                    .takes_value(true)
                    .allow_hyphen_values(true)
                    .requires("lon")
                    .help("Latitude of the fence center in decimal degrees."),
            )
            .arg(
                Arg::with_name("lon")
                    .long("lon")
                    .takes_value(true)
                    .allow_hyphen_values(true)
                    .requires("lat")
                    .help("Longitude of the fence center in decimal degrees."),
            )
            .arg(
                Arg::with_name("radius")
                    .long("radius")
                    .takes_value(true)
                    .help("Radius of the fence in meters.")
                    .long_help("Radius of the fence in meters. Defaults to 200."),
            )
            .arg(
                Arg::with_name("language")
                    .short("l")
                    .long("language")
                    .takes_value(true)
                    .default_value(Self::DEFAULT_LANGUAGE)
                    .help("English, Hindi, Tamil or Telugu.")
                    .long_help(concat!(
                        "Language for headings and destinations: English, Hindi, Tamil or ",
                        "Telugu. Short tags (en, hi, ta, te) work too."
                    )),
            )
            .after_help(concat!(
                "Without --lat/--lon the fence is centered on the IITM RP campus.\n\n",
                "Set RUST_LOG=debug to see every sample and its distance."
            ))
    }

    /// Process an `App` to get the parsed values out of it and the matches object so an application
    /// can continue with further argument parsing.
    pub fn matches(app: App<'a, 'b>) -> Result<(Self, ArgMatches<'a>), GeofenceErr> {
        let matches = app.get_matches();
        let cmd_line_opts = Self::from_matches(&matches)?;

        Ok((cmd_line_opts, matches))
    }

    /// Pull the common values out of already parsed arguments.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, GeofenceErr> {
        let parse_f64 = |name: &'static str| -> Result<Option<f64>, GeofenceErr> {
            matches
                .value_of(name)
                .map(|val| {
                    val.parse::<f64>().map_err(|_| {
                        GeofenceErr::GeneralError(format!("{} is not a number: {}", name, val))
                    })
                })
                .transpose()
        };

        let location = match (parse_f64("lat")?, parse_f64("lon")?) {
            (Some(lat), Some(lon)) => GeoPoint::new(lat, lon)?,
            _ => IITM_RP.location,
        };

        let radius = parse_f64("radius")?
            .map(Radius::from)
            .unwrap_or(IITM_RP.radius);

        let site = IITM_RP.relocated(location, radius)?;

        let language = matches
            .value_of("language")
            .unwrap_or(Self::DEFAULT_LANGUAGE);
        let language = Language::from_str(language)
            .map_err(|_| GeofenceErr::InvalidLanguage(language.to_owned()))?;

        Ok(CommonCmdLineArgs { site, language })
    }

    /// Get the fence
    pub fn site(&self) -> &TargetSite {
        &self.site
    }

    /// Get the language
    pub fn language(&self) -> Language {
        self.language
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/

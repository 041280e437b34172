use crate::types::Coordinates;
use anyhow::{Result, bail};
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "redadeg",
    about = "Log running and cycling workouts on a map, from the terminal"
)]
pub struct Cli {
    /// Latitude of the starting map view.
    ///
    /// Give both --lat and --lon. Leaving both out behaves like a denied
    /// location prompt: the map never initializes.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the starting map view.
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,
}

impl Cli {
    /// The one-shot location acquisition. `Ok(None)` is the denied path.
    pub fn start_location(&self) -> Result<Option<Coordinates>> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => {
                if !lat.is_finite() || !lon.is_finite() {
                    bail!("--lat and --lon must be finite numbers");
                }
                Ok(Some(Coordinates { lat, lon }))
            }
            (None, None) => Ok(None),
            _ => bail!("--lat and --lon must be given together"),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;

    #[test]
    fn both_options_give_a_start_location() {
        let cli = Cli::try_parse_from(["redadeg", "--lat", "47.0", "--lon", "8.0"]).unwrap();
        let start = cli.start_location().unwrap().expect("location");
        assert_eq!(start.lat, 47.0);
        assert_eq!(start.lon, 8.0);
    }

    #[test]
    fn negative_coordinates_parse() {
        let cli = Cli::try_parse_from(["redadeg", "--lat", "-33.9", "--lon", "18.4"]).unwrap();
        let start = cli.start_location().unwrap().expect("location");
        assert_eq!(start.lat, -33.9);
    }

    #[test]
    fn no_options_is_the_denied_path() {
        let cli = Cli::try_parse_from(["redadeg"]).unwrap();
        assert!(cli.start_location().unwrap().is_none());
    }

    #[test]
    fn a_lone_option_is_a_usage_error() {
        let cli = Cli::try_parse_from(["redadeg", "--lat", "47.0"]).unwrap();
        assert!(cli.start_location().is_err());
    }
}

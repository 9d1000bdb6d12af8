use clap::{builder::PossibleValuesParser, value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::{scale::SCALES, sort::Order};

/// Everything the command line controls.
#[derive(Debug, Clone)]
pub struct Args {
    pub scale: String,
    pub notes: Option<Vec<String>>,
    pub start_octave: u32,
    pub end_octave: u32,
    pub tempo: i64,
    pub order: Order,
    pub shuffle: bool,
    pub seed: Option<u64>,
    pub output_device: String,
    pub silent: bool,
}

pub fn command() -> Command {
    Command::new("note-sort")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sorts a scrambled scale with merge sort, playing every note it compares.")
        .args([
            Arg::new("scale")
                .short('s')
                .long("scale")
                .help("Scale in C to expand across the octave range")
                .value_parser(PossibleValuesParser::new(SCALES.iter().copied()))
                .default_value("pentatonic-major"),
            Arg::new("notes")
                .short('n')
                .long("notes")
                .help("Comma separated notes to sort instead of a scale (e.g. c4,eb4,g3)")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .conflicts_with_all(["scale", "start-octave", "end-octave"]),
            Arg::new("start-octave")
                .long("start-octave")
                .help("First octave of the scale (inclusive)")
                .value_parser(value_parser!(u32))
                .default_value("3"),
            Arg::new("end-octave")
                .long("end-octave")
                .help("Last octave of the scale (inclusive)")
                .value_parser(value_parser!(u32))
                .default_value("5"),
            Arg::new("tempo")
                .short('t')
                .long("tempo")
                .help("Beats per minute, one note per beat")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .default_value("480"),
            Arg::new("descending")
                .short('d')
                .long("descending")
                .help("Sort from the highest note to the lowest")
                .action(ArgAction::SetTrue),
            Arg::new("no-shuffle")
                .long("no-shuffle")
                .help("Sort the notes in the order given")
                .action(ArgAction::SetTrue),
            Arg::new("seed")
                .long("seed")
                .help("Seed for the scramble, for repeatable runs")
                .value_parser(value_parser!(u64)),
            Arg::new("output-device")
                .short('o')
                .long("output-device")
                .help("Output device, matched by name similarity")
                .default_value("default"),
            Arg::new("silent")
                .long("silent")
                .help("Don't open an audio device, only keep the pace")
                .action(ArgAction::SetTrue),
        ])
}

impl Args {
    pub fn parse() -> Self {
        Self::from_matches(&command().get_matches())
    }

    pub fn from_matches(m: &ArgMatches) -> Self {
        let descending = m.get_flag("descending");
        Self {
            scale: m.get_one::<String>("scale").unwrap().to_owned(),
            notes: m
                .get_many::<String>("notes")
                .map(|x| x.map(|x| x.trim().to_owned()).collect()),
            start_octave: *m.get_one("start-octave").unwrap(),
            end_octave: *m.get_one("end-octave").unwrap(),
            tempo: *m.get_one("tempo").unwrap(),
            order: Order::from_ascending(!descending),
            shuffle: !m.get_flag("no-shuffle"),
            seed: m.get_one("seed").copied(),
            output_device: m.get_one::<String>("output-device").unwrap().to_owned(),
            silent: m.get_flag("silent"),
        }
    }
}

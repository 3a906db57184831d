use clap::{command, Arg, ArgAction, ArgMatches};
use std::{path::PathBuf, time::Duration};

use crate::validators::*;
use osm_area_downloader::{BoundingBox, Config, Fixture, QueryFormat};

const BBOX_NORTH_ARG: &str = "north";
const BBOX_SOUTH_ARG: &str = "south";
const BBOX_WEST_ARG: &str = "west";
const BBOX_EAST_ARG: &str = "east";
const BBOX_FIXTURE_ARG: &str = "fixture";
const STEP_ARG: &str = "step";
const OUTPUT_DIR_ARG: &str = "output_dir";
const FILE_PREFIX_ARG: &str = "file_prefix";
const MERGED_FILE_ARG: &str = "merged_file";
const URL_ARG: &str = "url";
const TIMEOUT_ARG: &str = "timeout";
const DRY_RUN_ARG: &str = "dry_run";

pub struct Args {
    pub bounding_box: BoundingBox,
    pub step: f64,
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub merged_file: PathBuf,
    pub url: String,
    pub timeout: Duration,
    pub dry_run: bool,
}

impl std::convert::From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            bounding_box: args.bounding_box,
            step: args.step,
            output_folder: args.output_dir,
            file_prefix: args.file_prefix,
            merged_file: args.merged_file,
            url: args.url,
            query: QueryFormat::full_map(),
            timeout: args.timeout,
        }
    }
}

impl Args {
    pub fn parse() -> Self {
        let matches = get_matches();

        let bounding_box = match matches.get_one::<Fixture>(BBOX_FIXTURE_ARG) {
            // if a fixture is specified, construct the bounding box from that
            Some(f) => BoundingBox::from(*f),
            // otherwise, take the 4 coords separately
            None => BoundingBox::new_deg(
                *matches.get_one::<f64>(BBOX_SOUTH_ARG).unwrap(),
                *matches.get_one::<f64>(BBOX_WEST_ARG).unwrap(),
                *matches.get_one::<f64>(BBOX_NORTH_ARG).unwrap(),
                *matches.get_one::<f64>(BBOX_EAST_ARG).unwrap(),
            ),
        };

        let file_prefix =
            matches.get_one::<String>(FILE_PREFIX_ARG).unwrap().clone();

        let merged_file = match matches.get_one::<String>(MERGED_FILE_ARG) {
            Some(path) => PathBuf::from(path),
            // derived from the prefix, next to the output folder
            None => PathBuf::from(format!("{}_full.osm", file_prefix)),
        };

        Self {
            bounding_box,
            step: *matches.get_one::<f64>(STEP_ARG).unwrap(),
            output_dir: PathBuf::from(
                matches.get_one::<String>(OUTPUT_DIR_ARG).unwrap(),
            ),
            file_prefix,
            merged_file,
            url: matches.get_one::<String>(URL_ARG).unwrap().clone(),
            timeout: Duration::from_secs(
                *matches.get_one::<u64>(TIMEOUT_ARG).unwrap(),
            ),
            dry_run: matches.get_flag(DRY_RUN_ARG),
        }
    }
}

fn get_matches() -> ArgMatches {
    command!()
        .arg(
            Arg::new(BBOX_NORTH_ARG)
                .help("Latitude of north bounding box boundary (in degrees)")
                .value_parser(geo_coord)
                .default_value("23.5")
                .allow_hyphen_values(true)
                .short('n')
                .long("north"),
        )
        .arg(
            Arg::new(BBOX_SOUTH_ARG)
                .help("Latitude of south bounding box boundary (in degrees)")
                .value_parser(geo_coord)
                .default_value("22.5")
                .allow_hyphen_values(true)
                .short('s')
                .long("south"),
        )
        .arg(
            Arg::new(BBOX_EAST_ARG)
                .help("Longitude of east bounding box boundary (in degrees)")
                .value_parser(geo_coord)
                .default_value("114.0")
                .allow_hyphen_values(true)
                .short('e')
                .long("east"),
        )
        .arg(
            Arg::new(BBOX_WEST_ARG)
                .help("Longitude of west bounding box boundary (in degrees)")
                .value_parser(geo_coord)
                .default_value("112.5")
                .allow_hyphen_values(true)
                .short('w')
                .long("west"),
        )
        .arg(
            Arg::new(BBOX_FIXTURE_ARG)
                .help("Use a known, named bounding box (eg. guangzhou). Overrides the four boundary arguments.")
                .value_parser(fixture)
                .short('f')
                .long("fixture"),
        )
        .arg(
            Arg::new(STEP_ARG)
                .help("The edge length (in degrees) of a single grid cell.")
                .value_parser(positive_degrees)
                .default_value("0.1")
                .long("step"),
        )
        .arg(
            Arg::new(OUTPUT_DIR_ARG)
                .help("The folder the fetched cell files are saved to. Created if it does not exist.")
                .default_value("osm_data")
                .short('o')
                .long("output"),
        )
        .arg(
            Arg::new(FILE_PREFIX_ARG)
                .help("The file name prefix of the fetched cell files (`<prefix>_part_<index>.osm`).")
                .default_value("area")
                .short('p')
                .long("prefix"),
        )
        .arg(
            Arg::new(MERGED_FILE_ARG)
                .help("The path of the merged document. Defaults to `<prefix>_full.osm`.")
                .long("merged-file"),
        )
        .arg(
            Arg::new(URL_ARG)
                .help("The URL of the Overpass API endpoint the cell queries are sent to.")
                .default_value("https://overpass-api.de/api/interpreter")
                .short('u')
                .long("url"),
        )
        .arg(
            Arg::new(TIMEOUT_ARG)
                .help("The timeout (in seconds) for fetching a single cell. Pass 0 for no timeout.")
                .value_parser(seconds)
                .default_value("0")
                .short('t')
                .long("timeout"),
        )
        .arg(
            Arg::new(DRY_RUN_ARG)
                .help("Don't actually fetch anything, just determine how many cells would be fetched.")
                .action(ArgAction::SetTrue)
                .long("dry-run"),
        )
        .get_matches()
}

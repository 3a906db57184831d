use std::{fmt::Debug, path::PathBuf, time::Duration};

use crate::bounding_box::BoundingBox;
use crate::cell::Cell;
use crate::query::QueryFormat;

/// Area fetching configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Target region in south, west, north, east order.
    pub bounding_box: BoundingBox,

    /// Cell edge length of the fetch grid, in degrees.
    pub step: f64,

    /// The folder the per-cell artifacts are written to.
    pub output_folder: PathBuf,

    /// Name stem of the output files (`{prefix}_part_{index}.osm`).
    pub file_prefix: String,

    /// Path of the merged document.
    pub merged_file: PathBuf,

    /// The Overpass endpoint the queries are POSTed to.
    pub url: String,

    /// The query payload template rendered once per cell.
    pub query: QueryFormat,

    /// Timeout for fetching a single cell.
    ///
    /// Pass the zero duration to disable the timeout.
    pub timeout: Duration,
}

impl Config {
    /// Creates an iterator over all grid cells of the contained bounding
    /// box, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + Debug {
        self.bounding_box.cells(self.step)
    }
}

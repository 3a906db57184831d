//! Download OpenStreetMap-data for whole areas from the Overpass API.
//!
//! **Use with absolute caution.** Downloading large areas puts serious
//! load on the public Overpass servers. I am not responsible for any
//! damage this tool may cause.
//!
//! The area is split into a grid of bounding boxes no larger than a
//! configurable step (in degrees). Each grid cell is fetched with its
//! own Overpass query and saved to its own `.osm` file, and the
//! per-cell files are finally merged into a single combined document.
//!
//! # Usage
//!
//! This tool is available on [crates.io](https://crates.io) and can be
//! installed via `cargo install osm-area-downloader`. It features a helpful
//! CLI you can access via `-h` / `--help`.
//!
//! It is also available as a library.
//!
//! # CLI Example
//!
//! ```bash
//! osm-area-downloader \
//!   --north 23.5 \
//!   --east 114.0 \
//!   --south 22.5 \
//!   --west 112.5 \
//!   --step 0.1 \
//!   --output ./osm_data \
//!   --prefix guangzhou
//! ```
//!
//! # Library Example
//! ```no_run
//! use osm_area_downloader::{fetch, merge, BoundingBox, Config, QueryFormat};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let config = Config {
//!     bounding_box: BoundingBox::new_deg(22.5, 112.5, 23.5, 114.0),
//!     step: 0.1,
//!     output_folder: "./osm_data".into(),
//!     file_prefix: "guangzhou".to_owned(),
//!     merged_file: "./osm_data/guangzhou_full.osm".into(),
//!     url: "https://overpass-api.de/api/interpreter".to_owned(),
//!     query: QueryFormat::full_map(),
//!     timeout: Duration::from_secs(0),
//! };
//!
//! let output_folder = config.output_folder.clone();
//! let merged_file = config.merged_file.clone();
//!
//! fetch(config).await.expect("failed fetching cells");
//! merge(&output_folder, &merged_file)
//!     .await
//!     .expect("failed merging cells");
//! # }
//! ```

mod bounding_box;
mod cell;
mod config;
mod fetch;
mod merge;
mod query;

pub use bounding_box::{BoundingBox, Fixture};
pub use cell::Cell;
pub use config::Config;
pub use fetch::fetch;
pub use merge::merge;
pub use query::QueryFormat;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    fn bbox_panics_deg() {
        BoundingBox::new_deg(360.0, 0.0, 0.0, 0.0);
    }

    #[test]
    #[should_panic]
    fn bbox_panics_inverted() {
        BoundingBox::new_deg(23.5, 112.5, 22.5, 114.0);
    }

    #[test]
    #[should_panic]
    fn cells_panic_on_zero_step() {
        let bbox = BoundingBox::new_deg(0.0, 0.0, 1.0, 1.0);
        bbox.cells(0.0).count();
    }

    #[test]
    fn cell_indices_are_one_based_and_contiguous() {
        let bbox = BoundingBox::new_deg(0.0, 0.0, 1.0, 1.0);
        let indices: Vec<_> =
            bbox.cells(0.4).map(|cell| cell.index).collect();
        assert_eq!(indices, (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn cell_file_name_carries_prefix_and_index() {
        let bbox = BoundingBox::new_deg(0.0, 0.0, 1.0, 1.0);
        let cell = Cell::new(12, bbox);
        assert_eq!(cell.file_name("area"), "area_part_12.osm");
    }

    #[test]
    fn query_renders_bounds() {
        let fmt = QueryFormat::full_map();
        let bbox = BoundingBox::new_deg(22.5, 112.5, 22.6, 112.6);
        let query = fmt.cell_query(&bbox).expect("failed rendering query");

        assert!(query.contains("[out:xml][timeout:3600];"));
        assert!(query.contains("node(22.5,112.5,22.6,112.6);"));
        assert!(query.contains("way(22.5,112.5,22.6,112.6);"));
        assert!(query.contains("relation(22.5,112.5,22.6,112.6);"));
        assert!(query.contains("out meta;"));
    }
}

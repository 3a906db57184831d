use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::bounding_box::BoundingBox;
use crate::merge::OSM_SUFFIX;
use crate::query::QueryFormat;

/// One cell of the fetch grid: a sub-rectangle of the target region plus
/// its 1-based position in row-major grid order. The position names the
/// cell's artifact file, so grid order must stay reproducible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub index: usize,
    pub bbox: BoundingBox,
}

impl Cell {
    pub fn new(index: usize, bbox: BoundingBox) -> Self {
        Self { index, bbox }
    }

    /// File name of this cell's artifact, eg. `area_part_12.osm`.
    pub fn file_name(&self, prefix: &str) -> String {
        format!("{}_part_{}{}", prefix, self.index, OSM_SUFFIX)
    }

    /// Fetches this cell's map data from the given endpoint using the given
    /// HTTP client and writes the response body verbatim to the cell's
    /// artifact file, overwriting any previous artifact of the same name.
    ///
    /// The query is sent as the raw POST body with a form-urlencoded
    /// content type, which is what Overpass interpreters expect.
    pub async fn fetch_from(
        &self,
        client: &reqwest::Client,
        query_fmt: &QueryFormat,
        url: &str,
        output_folder: &Path,
        file_prefix: &str,
    ) -> Result<PathBuf> {
        let query = query_fmt.cell_query(&self.bbox)?;
        let output_file = output_folder.join(self.file_name(file_prefix));

        let response = client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(query)
            .send()
            .await
            .with_context(|| format!("failed fetching cell {}", self.index))?;

        let body = response
            .error_for_status()
            .with_context(|| {
                format!(
                    "received invalid status code fetching cell {}",
                    self.index
                )
            })?
            .bytes()
            .await
            .with_context(|| {
                format!("failed reading response body for cell {}", self.index)
            })?;

        fs::write(&output_file, &body)
            .await
            .with_context(|| format!("failed writing cell {} to disk", self.index))?;

        Ok(output_file)
    }
}

use anyhow::{Context, Result};
use maplit::hashmap;
use strfmt::strfmt;

use crate::bounding_box::BoundingBox;

/// Server-side evaluation limit (in seconds) embedded in every query. This
/// is a hint to the remote service, not a client-side timeout.
const QUERY_TIMEOUT_SECS: u32 = 3600;

/// Full-metadata map query: every node, way and relation inside the
/// bounding box, output as XML.
const FULL_MAP_TEMPLATE: &str = "\
[out:xml][timeout:{timeout}];
(
  node({south},{west},{north},{east});
  way({south},{west},{north},{east});
  relation({south},{west},{north},{east});
);
out meta;
";

/// An Overpass QL payload template with the replacement specifiers
/// `{south}`, `{west}`, `{north}`, `{east}` and `{timeout}`.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryFormat {
    format_str: String,
}

impl QueryFormat {
    /// The default query: everything inside the box, with full metadata.
    pub fn full_map() -> Self {
        Self::from_string(FULL_MAP_TEMPLATE.to_owned())
    }

    pub fn from_string(format_str: String) -> Self {
        Self { format_str }
    }

    /// Renders the payload for one cell's bounding box.
    pub fn cell_query(&self, bbox: &BoundingBox) -> Result<String> {
        let vars = hashmap! {
            "timeout".to_owned() => QUERY_TIMEOUT_SECS.to_string(),
            "south".to_owned() => bbox.south.to_string(),
            "west".to_owned() => bbox.west.to_string(),
            "north".to_owned() => bbox.north.to_string(),
            "east".to_owned() => bbox.east.to_string(),
        };

        strfmt(&self.format_str, &vars).context("failed formatting query")
    }
}

impl Default for QueryFormat {
    fn default() -> Self {
        Self::full_map()
    }
}

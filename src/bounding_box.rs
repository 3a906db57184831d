use std::fmt::Debug;

use crate::cell::Cell;

/// A bounding box consisting of south, west, north and east coordinate
/// boundaries given in degrees.
///
/// Bounds follow the Overpass bbox order `(south, west, north, east)`,
/// i.e. `(min_lat, min_lon, max_lat, max_lon)`.
///
/// # Example
/// ```rust
/// # use osm_area_downloader::BoundingBox;
/// let guangzhou = BoundingBox::new_deg(22.5, 112.5, 23.5, 114.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Create a new bounding box from the specified coordinates given in
    /// degrees (-90(S) to 90(N)° latitude, -180(W) to 180(E)° longitude).
    ///
    /// # Example
    /// ```rust
    /// # use osm_area_downloader::BoundingBox;
    /// let guangzhou = BoundingBox::new_deg(22.5, 112.5, 23.5, 114.0);
    /// ```
    ///
    /// # Panics
    /// Panics if a latitude is outside [-90, 90], a longitude is outside
    /// [-180, 180], or a minimum bound exceeds its maximum.
    pub fn new_deg(south: f64, west: f64, north: f64, east: f64) -> Self {
        assert!(south >= -90.0 && south <= 90.0, "south out of range");
        assert!(north >= -90.0 && north <= 90.0, "north out of range");
        assert!(west >= -180.0 && west <= 180.0, "west out of range");
        assert!(east >= -180.0 && east <= 180.0, "east out of range");
        assert!(south <= north, "south exceeds north");
        assert!(west <= east, "west exceeds east");

        BoundingBox {
            south,
            west,
            north,
            east,
        }
    }

    /// Creates an iterator over the grid of cells `step` degrees on a side
    /// covering this bounding box, in row-major order (all columns of the
    /// southernmost row first, longitude varying fastest). The last row and
    /// column are clipped to the original bounds instead of overshooting.
    ///
    /// Row and column counts are `(range / step) as usize + 1`. When the
    /// range divides into `step` exactly this produces one extra,
    /// zero-sized row/column; downstream consumers depend on the resulting
    /// cell count, so the formula is kept as is.
    ///
    /// # Panics
    /// Panics if `step` is not a positive, finite number.
    pub fn cells(&self, step: f64) -> impl Iterator<Item = Cell> + Debug {
        assert!(step.is_finite(), "step must be finite");
        assert!(step > 0.0, "step must be > 0");

        let (s, w, n, e) = (self.south, self.west, self.north, self.east);
        let rows = ((n - s) / step) as usize + 1;
        let cols = ((e - w) / step) as usize + 1;

        (0..rows)
            .flat_map(move |i| {
                (0..cols).map(move |j| BoundingBox {
                    south: s + i as f64 * step,
                    west: w + j as f64 * step,
                    north: (s + (i + 1) as f64 * step).min(n),
                    east: (w + (j + 1) as f64 * step).min(e),
                })
            })
            .enumerate()
            .map(|(i, bbox)| Cell::new(i + 1, bbox))
    }
}

/// A bounding box fixture containing preset coordinates for a known
/// geographic region.
#[derive(Clone, Copy, Debug)]
pub enum Fixture {
    Guangzhou,
    Shenzhen,
}

impl std::str::FromStr for Fixture {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Fixture::*;

        if s.to_lowercase().starts_with("guangzhou") {
            return Ok(Guangzhou);
        }

        if s.to_lowercase().starts_with("shenzhen") {
            return Ok(Shenzhen);
        }

        Err("unrecognized fixture")
    }
}

impl std::convert::From<Fixture> for BoundingBox {
    fn from(fixture: Fixture) -> Self {
        use Fixture::*;

        match fixture {
            Guangzhou => Self::new_deg(22.5, 112.5, 23.5, 114.0),
            Shenzhen => Self::new_deg(22.45, 113.75, 22.85, 114.65),
        }
    }
}

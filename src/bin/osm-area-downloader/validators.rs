use osm_area_downloader::Fixture;

pub fn geo_coord(v: &str) -> Result<f64, String> {
    let val = v.parse::<f64>().map_err(|_| "must be numeric".to_owned())?;

    if val < -180f64 {
        return Err("must be >= -180°".to_owned());
    } else if val > 180f64 {
        return Err("must be <= 180°".to_owned());
    }

    Ok(val)
}

pub fn positive_degrees(v: &str) -> Result<f64, String> {
    let val = v.parse::<f64>().map_err(|_| "must be numeric".to_owned())?;

    if !val.is_finite() || val <= 0f64 {
        return Err("must be > 0".to_owned());
    }

    Ok(val)
}

pub fn seconds(v: &str) -> Result<u64, String> {
    v.parse::<u64>().map_err(|_| "must be numeric".to_owned())
}

pub fn fixture(v: &str) -> Result<Fixture, String> {
    v.parse::<Fixture>().map_err(|_| "invalid fixture".to_owned())
}

use anyhow::{Context, Result};
use clap::crate_version;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::{fs, time};

use crate::config::Config;

/// Fixed pause after every request, successful or not, to stay clear of
/// upstream rate limiting. Deliberately a blunt fixed delay, not adaptive
/// backoff.
const REQUEST_DELAY: Duration = Duration::from_secs(2);
const ZERO_DURATION: Duration = Duration::from_secs(0);

/// Sequentially fetch the map data for every grid cell specified in `cfg`
/// and save the raw response bodies to the file system.
///
/// Creates the output directory if required and overwrites any existing
/// artifact files at the destination. Cells are fetched strictly one after
/// another with a fixed 2 second pause after each request; a cell that
/// fails is reported on the console and skipped, and the run continues
/// with the next cell. The returned result is `Ok` regardless of how many
/// individual cells failed.
///
/// # Example
/// ```no_run
/// use osm_area_downloader::{fetch, BoundingBox, Config, QueryFormat};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let config = Config {
///     bounding_box: BoundingBox::new_deg(22.5, 112.5, 23.5, 114.0),
///     step: 0.1,
///     output_folder: "./osm_data".into(),
///     file_prefix: "guangzhou".to_owned(),
///     merged_file: "guangzhou_full.osm".into(),
///     url: "https://overpass-api.de/api/interpreter".to_owned(),
///     query: QueryFormat::full_map(),
///     timeout: Duration::from_secs(0),
/// };
///
/// fetch(config).await.expect("failed fetching cells");
/// # }
/// ```
///
/// # Panics
/// Panics if the specified output folder exists and is not a folder but a file.
pub async fn fetch(cfg: Config) -> Result<()> {
    let output_folder = cfg.output_folder.as_path();

    assert!(
        !output_folder.exists() || output_folder.is_dir(),
        "output must be a directory",
    );

    if !output_folder.exists() {
        fs::create_dir_all(output_folder)
            .await
            .context("failed to create output directory")?;
    }

    let mut builder = reqwest::Client::builder();
    if cfg.timeout > ZERO_DURATION {
        builder = builder.timeout(cfg.timeout);
    }

    let mut headers = reqwest::header::HeaderMap::new();
    headers.append(
        reqwest::header::USER_AGENT,
        format!("osm-area-downloader_rs_{}", crate_version!())
            .parse()
            .unwrap(),
    );

    let client = builder
        .default_headers(headers)
        .build()
        .with_context(|| "failed creating HTTP client")?;

    let cell_count = cfg.cells().count();
    let pb = ProgressBar::new(cell_count as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:60.cyan/blue} {pos:>7}/{len:7} ETA: {eta} {msg}",
        )?
        .progress_chars("##-"),
    );

    for cell in cfg.cells() {
        pb.set_message(format!(
            "cell {} ({},{},{},{})",
            cell.index, cell.bbox.south, cell.bbox.west, cell.bbox.north, cell.bbox.east,
        ));

        match cell
            .fetch_from(
                &client,
                &cfg.query,
                &cfg.url,
                output_folder,
                &cfg.file_prefix,
            )
            .await
        {
            Ok(path) => pb.println(format!(
                "saved cell {}/{} to {}",
                cell.index,
                cell_count,
                path.display(),
            )),
            Err(err) => eprintln!("Failed fetching cell {}: {:?}", cell.index, err),
        }

        pb.inc(1);
        time::sleep(REQUEST_DELAY).await;
    }

    pb.finish_and_clear();

    Ok(())
}

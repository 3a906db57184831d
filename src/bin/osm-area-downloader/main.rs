mod args;
mod validators;

use anyhow::Result;
use args::Args;
use osm_area_downloader::{fetch, merge, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let dry_run = args.dry_run;
    let config: Config = args.into();

    if dry_run {
        let cell_count = config.cells().count();

        eprintln!(
            "would fetch {} cells (approx {}, assuming 2 MB per cell)",
            cell_count,
            pretty_bytes::converter::convert((cell_count as f64) * 2_000_000f64)
        );

        Ok(())
    } else {
        let output_folder = config.output_folder.clone();
        let merged_file = config.merged_file.clone();

        fetch(config).await?;

        let merged = merge(&output_folder, &merged_file).await?;
        println!("merged {} parts into {}", merged, merged_file.display());

        Ok(())
    }
}

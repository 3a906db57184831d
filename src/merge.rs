use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufWriter};

/// File-type suffix shared by the per-cell artifacts and the merged
/// document.
pub(crate) const OSM_SUFFIX: &str = ".osm";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
const ROOT_OPEN: &str = "<osm version=\"0.6\">\n";
const ROOT_CLOSE: &str = "</osm>";

/// Line prefixes marking a source document's envelope: the XML declaration
/// and the root element's open and close tags. Matched against the raw
/// line start, not parsed, so any unrelated line that happens to begin
/// with `<osm` is dropped as well.
const ENVELOPE_PREFIXES: [&str; 3] = ["<?xml", "<osm", "</osm"];

fn is_envelope_line(line: &str) -> bool {
    ENVELOPE_PREFIXES
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

/// Concatenates all `.osm` artifacts in `input_folder` into one combined
/// document at `output_file` and returns how many artifacts went into it.
///
/// Artifacts are merged in lexicographic file-name order (so `part_10`
/// sorts before `part_2`), which keeps the output deterministic across
/// runs and file systems; element order inside the envelope carries no
/// meaning. Each artifact's lines are copied byte-for-byte except for its
/// envelope lines, and the whole output is framed by a single synthetic
/// envelope.
///
/// Inputs are not validated, and an artifact that is missing because its
/// fetch failed is simply not part of the output.
pub async fn merge(input_folder: &Path, output_file: &Path) -> Result<usize> {
    let mut parts = Vec::new();
    let mut entries = fs::read_dir(input_folder)
        .await
        .with_context(|| format!("failed listing {}", input_folder.display()))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("failed listing {}", input_folder.display()))?
    {
        if entry.file_name().to_string_lossy().ends_with(OSM_SUFFIX) {
            parts.push(entry.path());
        }
    }
    parts.sort();

    let output = fs::File::create(output_file)
        .await
        .with_context(|| format!("failed creating {}", output_file.display()))?;
    let mut writer = BufWriter::new(output);

    writer.write_all(XML_DECLARATION.as_bytes()).await?;
    writer.write_all(ROOT_OPEN.as_bytes()).await?;

    for part in &parts {
        let body = fs::read_to_string(part)
            .await
            .with_context(|| format!("failed reading {}", part.display()))?;

        for line in body.split_inclusive('\n') {
            if is_envelope_line(line) {
                continue;
            }
            writer.write_all(line.as_bytes()).await?;
        }
    }

    writer.write_all(ROOT_CLOSE.as_bytes()).await?;
    writer
        .flush()
        .await
        .with_context(|| format!("failed writing {}", output_file.display()))?;

    Ok(parts.len())
}

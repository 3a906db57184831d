use osm_area_downloader::merge;
use tempfile::TempDir;

const HEADER: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<osm version=\"0.6\">\n";
const FOOTER: &str = "</osm>";

fn sample_osm(payload: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<osm version=\"0.6\">\n{}</osm>\n",
        payload
    )
}

#[tokio::test]
async fn merges_parts_inside_a_single_envelope() {
    let dir = TempDir::new().unwrap();
    let parts = dir.path().join("parts");
    std::fs::create_dir(&parts).unwrap();

    std::fs::write(
        parts.join("area_part_1.osm"),
        sample_osm("  <node id=\"1\" lat=\"22.5\" lon=\"112.5\"/>\n"),
    )
    .unwrap();
    std::fs::write(
        parts.join("area_part_2.osm"),
        sample_osm("  <node id=\"2\" lat=\"22.6\" lon=\"112.6\"/>\n"),
    )
    .unwrap();

    let output = dir.path().join("area_full.osm");
    let merged = merge(&parts, &output).await.unwrap();

    assert_eq!(merged, 2);
    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        content,
        format!(
            "{}  <node id=\"1\" lat=\"22.5\" lon=\"112.5\"/>\n  <node id=\"2\" lat=\"22.6\" lon=\"112.6\"/>\n{}",
            HEADER, FOOTER
        )
    );
}

#[tokio::test]
async fn parts_merge_in_lexicographic_name_order() {
    let dir = TempDir::new().unwrap();
    let parts = dir.path().join("parts");
    std::fs::create_dir(&parts).unwrap();

    for index in [1, 2, 10] {
        std::fs::write(
            parts.join(format!("area_part_{}.osm", index)),
            sample_osm(&format!("  <node id=\"{}\"/>\n", index)),
        )
        .unwrap();
    }

    let output = dir.path().join("area_full.osm");
    merge(&parts, &output).await.unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    let pos = |needle: &str| content.find(needle).unwrap();

    // lexicographic, not numeric: part_10 sorts between part_1 and part_2
    assert!(pos("id=\"1\"") < pos("id=\"10\""));
    assert!(pos("id=\"10\"") < pos("id=\"2\""));
}

#[tokio::test]
async fn only_osm_files_are_merged() {
    let dir = TempDir::new().unwrap();
    let parts = dir.path().join("parts");
    std::fs::create_dir(&parts).unwrap();

    std::fs::write(
        parts.join("area_part_1.osm"),
        sample_osm("  <node id=\"1\"/>\n"),
    )
    .unwrap();
    std::fs::write(parts.join("notes.txt"), "do not merge\n").unwrap();
    std::fs::write(
        parts.join("area_part_2.osm.bak"),
        sample_osm("  <node id=\"99\"/>\n"),
    )
    .unwrap();

    let output = dir.path().join("area_full.osm");
    let merged = merge(&parts, &output).await.unwrap();

    assert_eq!(merged, 1);
    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("id=\"1\""));
    assert!(!content.contains("do not merge"));
    assert!(!content.contains("id=\"99\""));
}

#[tokio::test]
async fn envelope_stripping_matches_line_prefixes_only() {
    let dir = TempDir::new().unwrap();
    let parts = dir.path().join("parts");
    std::fs::create_dir(&parts).unwrap();

    let body = concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<osm version=\"0.6\">\n",
        "<osmAuthor name=\"overpass\"/>\n",
        "  <osm-note/>\n",
        "  <node id=\"1\"/>\n",
        "</osm>\n",
    );
    std::fs::write(parts.join("area_part_1.osm"), body).unwrap();

    let output = dir.path().join("area_full.osm");
    merge(&parts, &output).await.unwrap();

    let content = std::fs::read_to_string(&output).unwrap();

    // any line starting with an envelope prefix is dropped, even this one
    assert!(!content.contains("osmAuthor"));
    // indented osm-ish lines survive untouched
    assert_eq!(
        content,
        format!("{}  <osm-note/>\n  <node id=\"1\"/>\n{}", HEADER, FOOTER)
    );
}

#[tokio::test]
async fn missing_parts_shrink_the_document() {
    let dir = TempDir::new().unwrap();
    let parts = dir.path().join("parts");
    std::fs::create_dir(&parts).unwrap();

    // part 3 failed to fetch and was never written
    for index in [1, 2, 4, 5] {
        std::fs::write(
            parts.join(format!("area_part_{}.osm", index)),
            sample_osm(&format!("  <node id=\"{}\"/>\n", index)),
        )
        .unwrap();
    }

    let output = dir.path().join("area_full.osm");
    let merged = merge(&parts, &output).await.unwrap();

    assert_eq!(merged, 4);
}

#[tokio::test]
async fn empty_folder_merges_to_bare_envelope() {
    let dir = TempDir::new().unwrap();
    let parts = dir.path().join("parts");
    std::fs::create_dir(&parts).unwrap();

    let output = dir.path().join("area_full.osm");
    let merged = merge(&parts, &output).await.unwrap();

    assert_eq!(merged, 0);
    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(content, format!("{}{}", HEADER, FOOTER));
}

#[tokio::test]
async fn unterminated_final_lines_concatenate() {
    let dir = TempDir::new().unwrap();
    let parts = dir.path().join("parts");
    std::fs::create_dir(&parts).unwrap();

    // the first part's payload has no trailing newline
    std::fs::write(
        parts.join("area_part_1.osm"),
        "<osm version=\"0.6\">\n  <node id=\"1\"/>",
    )
    .unwrap();
    std::fs::write(
        parts.join("area_part_2.osm"),
        "<osm version=\"0.6\">\n  <node id=\"2\"/>\n</osm>",
    )
    .unwrap();

    let output = dir.path().join("area_full.osm");
    merge(&parts, &output).await.unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("  <node id=\"1\"/>  <node id=\"2\"/>\n"));
}

#[tokio::test]
async fn missing_input_folder_is_an_error() {
    let dir = TempDir::new().unwrap();

    let output = dir.path().join("area_full.osm");
    let result = merge(&dir.path().join("nope"), &output).await;

    assert!(result.is_err());
}

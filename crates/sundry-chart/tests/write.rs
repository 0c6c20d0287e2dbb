//! Writing the full chart set to disk.

#![allow(clippy::unwrap_used)]

use sundry_chart::{Holdings, OUTPUT_FILES, write_charts};

#[test]
fn test_write_charts_creates_every_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("charts");
    let holdings = Holdings::raw().normalized(40.0).unwrap();

    let written = write_charts(&out, &holdings).unwrap();

    assert_eq!(written.len(), OUTPUT_FILES.len());
    for (path, name) in written.iter().zip(OUTPUT_FILES) {
        assert!(path.ends_with(name));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(!content.is_empty());
    }
    let dashboard = std::fs::read_to_string(out.join("dashboard.html")).unwrap();
    assert!(dashboard.contains("Total Market Size: $40 Trillion"));
    let donut = std::fs::read_to_string(out.join("donut.svg")).unwrap();
    assert!(donut.contains("$40T Total"));
}

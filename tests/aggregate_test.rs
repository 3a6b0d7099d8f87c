//! Integration tests for documentation tree aggregation.

use std::fs;
use std::path::Path;

use docbind::aggregate::{aggregate, collect_sources, title_header};
use docbind::{AggregateOptions, Error};

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

/// A small site: a weighted section, an unweighted page and a root index.
fn site(root: &Path) {
    write(
        root,
        "content/_index.md",
        "---\ntitle: Home\nweight: 1\n---\n# Welcome\n\nStart [here](/guides/start/).\n",
    );
    write(
        root,
        "content/components/_index.md",
        "---\nweight: 20\n---\n# Components\n",
    );
    write(
        root,
        "content/components/dht.md",
        "---\ntitle: DHT\nweight: 2\n---\n# DHT Sensor\n{{< img src=\"/images/dht.jpg\" alt=\"DHT22\" >}}\n",
    );
    write(
        root,
        "content/guides/_index.md",
        "---\nweight: 10\n---\n# Guides\n",
    );
    write(
        root,
        "content/guides/start.md",
        "{{< anchor \"start\" >}}\n## Getting started\nSee {{< pr number=\"42\" >}}.\n",
    );
    write(root, "content/guides/image.png", "not markdown");
}

// ==================== Ordering Tests ====================

#[test]
fn test_directory_weights_order_sections() {
    let dir = tempfile::tempdir().unwrap();
    site(dir.path());

    let files = collect_sources(&dir.path().join("content"), dir.path()).unwrap();
    let order: Vec<&str> = files.iter().map(|f| f.relative.as_str()).collect();

    assert_eq!(
        order,
        vec![
            "content/_index.md",
            "content/guides/_index.md",
            "content/guides/start.md",
            "content/components/dht.md",
            "content/components/_index.md",
        ]
    );
}

// ==================== Concatenation Tests ====================

#[test]
fn test_aggregate_rewrites_and_marks_provenance() {
    let dir = tempfile::tempdir().unwrap();
    site(dir.path());

    let options = AggregateOptions::new(dir.path().join("content"));
    let result = aggregate(&options).unwrap();

    assert_eq!(result.file_count, 5);
    assert!(result
        .text
        .starts_with("\n\n---\n\n<!-- SOURCE: content/_index.md -->\n\n## Welcome"));
    assert!(result
        .text
        .contains("Start [here](https://esphome.io/guides/start/)."));
    assert!(result
        .text
        .contains("### Getting started\nSee (PR #42 \u{b7} esphome)."));
    assert!(result
        .text
        .contains("![DHT22](https://esphome.io/images/dht.jpg)"));
    assert!(!result.text.contains("{{<"));
    assert!(!result.text.contains("weight:"));
    assert_eq!(result.text.matches("<!-- SOURCE:").count(), 5);
}

#[test]
fn test_aggregate_with_header_and_no_shift() {
    let dir = tempfile::tempdir().unwrap();
    site(dir.path());

    let options = AggregateOptions::new(dir.path().join("content"))
        .with_site_url("https://docs.example.org/")
        .with_heading_shift(0)
        .with_header(title_header("Example", "https://docs.example.org/"));
    let result = aggregate(&options).unwrap();

    assert!(result
        .text
        .starts_with("# Example\n\n> **Source**: https://docs.example.org/\n\n\n\n---\n"));
    assert!(result.text.contains("\n# Welcome\n"));
    assert!(result
        .text
        .contains("[here](https://docs.example.org/guides/start/)"));
}

#[test]
fn test_empty_source_directory() {
    let dir = tempfile::tempdir().unwrap();
    let result = aggregate(&AggregateOptions::new(dir.path())).unwrap();
    assert_eq!(result.file_count, 0);
    assert!(result.text.is_empty());
}

#[test]
fn test_source_must_be_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("page.md");
    fs::write(&file, "# Page\n").unwrap();

    let result = aggregate(&AggregateOptions::new(&file));
    assert!(matches!(result, Err(Error::MissingSource(_))));
}

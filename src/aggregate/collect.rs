//! Discovery and ordering of the markdown pages under a source directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

use super::frontmatter::split_front_matter;

/// Weight given to pages and directories that declare none.
pub const DEFAULT_WEIGHT: i64 = 10_000_000;

/// Name of the per-directory page that carries the directory's weight.
pub const INDEX_PAGE: &str = "_index.md";

/// One markdown page, front matter already removed.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// Absolute or source-relative path on disk
    pub path: PathBuf,
    /// Path shown in the provenance comment, `/`-separated
    pub relative: String,
    /// Weight of the containing directory
    pub dir_weight: i64,
    /// Weight of the page itself
    pub weight: i64,
    /// Front-matter title
    pub title: Option<String>,
    /// Page body
    pub body: String,
}

impl SourceFile {
    fn sort_key(&self) -> (i64, i64, String) {
        (
            self.dir_weight,
            self.weight,
            self.path.to_string_lossy().to_lowercase(),
        )
    }
}

fn display_relative(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

/// Collect every `*.md` file below `source_dir`, ordered by directory weight,
/// page weight, then case-insensitive path.
pub fn collect_sources(source_dir: &Path, provenance_root: &Path) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    let mut dir_weights: HashMap<PathBuf, i64> = HashMap::new();

    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown(path) {
            continue;
        }

        let raw = fs::read(path)?;
        let text = String::from_utf8_lossy(&raw);
        let (meta, body) = split_front_matter(&text);

        let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();
        if entry.file_name() == INDEX_PAGE {
            if let Some(weight) = meta.weight {
                dir_weights.insert(parent.clone(), weight);
            }
        }

        log::debug!("Collected {}", path.display());
        files.push((
            parent,
            SourceFile {
                path: path.to_path_buf(),
                relative: display_relative(path, provenance_root),
                dir_weight: DEFAULT_WEIGHT,
                weight: meta.weight.unwrap_or(DEFAULT_WEIGHT),
                title: meta.title,
                body: body.to_string(),
            },
        ));
    }

    let mut sources: Vec<SourceFile> = files
        .into_iter()
        .map(|(parent, mut file)| {
            if let Some(weight) = dir_weights.get(&parent) {
                file.dir_weight = *weight;
            }
            file
        })
        .collect();

    sources.sort_by_cached_key(SourceFile::sort_key);
    Ok(sources)
}

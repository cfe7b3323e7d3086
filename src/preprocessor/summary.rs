use once_cell::sync::Lazy;
use regex::Regex;

use crate::fetcher::ConfigFile;
use crate::github::FileTreeEntry;

/// Top-level directories listed in the structure summary
pub const MAX_TOP_LEVEL_DIRS: usize = 15;
/// Top-level files listed in the structure summary
pub const MAX_TOP_LEVEL_FILES: usize = 15;
/// Headings kept from an existing README
pub const MAX_README_HEADERS: usize = 10;
/// Characters kept from each configuration file
pub const CONFIG_PREVIEW_CHARS: usize = 200;
/// Summary used when no configuration file was fetched
pub const NO_CONFIG_FILES: &str = "No configuration files found.";

const IGNORED_DIRS: &[&str] = &["node_modules", "__pycache__"];

static MARKDOWN_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#+\s+.+$").expect("heading pattern is valid"));

/// Two labelled lines listing top-level directories and files
///
/// Dot-directories, `node_modules` and `__pycache__` are skipped. Either
/// line is omitted when empty.
pub fn summarize_project_structure(file_tree: &[FileTreeEntry]) -> String {
    let dirs: Vec<&str> = file_tree
        .iter()
        .filter(|e| e.is_dir() && e.is_top_level())
        .map(|e| e.path.as_str())
        .filter(|p| !p.starts_with('.') && !IGNORED_DIRS.contains(p))
        .take(MAX_TOP_LEVEL_DIRS)
        .collect();

    let files: Vec<&str> = file_tree
        .iter()
        .filter(|e| e.is_file() && e.is_top_level())
        .map(|e| e.path.as_str())
        .take(MAX_TOP_LEVEL_FILES)
        .collect();

    let mut parts = Vec::with_capacity(2);
    if !dirs.is_empty() {
        parts.push(format!("Directories: {}", dirs.join(", ")));
    }
    if !files.is_empty() {
        parts.push(format!("Files: {}", files.join(", ")));
    }
    parts.join("\n")
}

/// Section headings of an existing README, or `None` when there are none
pub fn summarize_existing_readme(readme: Option<&str>) -> Option<String> {
    let readme = readme?;
    let headers: Vec<&str> = MARKDOWN_HEADING
        .find_iter(readme)
        .map(|m| m.as_str().trim_end())
        .take(MAX_README_HEADERS)
        .collect();

    if headers.is_empty() {
        return None;
    }
    Some(format!("Existing README sections: {}", headers.join(", ")))
}

/// `path: <first 200 chars>...` per configuration file
pub fn summarize_config_files(config_files: &[ConfigFile]) -> String {
    if config_files.is_empty() {
        return NO_CONFIG_FILES.to_string();
    }

    config_files
        .iter()
        .map(|file| {
            let preview: String = file.content.chars().take(CONFIG_PREVIEW_CHARS).collect();
            format!("{}: {}...", file.path, preview)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_structure_summary() {
        let tree = vec![
            FileTreeEntry::directory("src"),
            FileTreeEntry::directory(".github"),
            FileTreeEntry::directory("node_modules"),
            FileTreeEntry::directory("src/components"),
            FileTreeEntry::file("package.json"),
            FileTreeEntry::file("src/index.ts"),
            FileTreeEntry::file(".gitignore"),
        ];
        assert_eq!(
            summarize_project_structure(&tree),
            "Directories: src\nFiles: package.json, .gitignore"
        );
    }

    #[test]
    fn test_structure_summary_caps() {
        let tree: Vec<FileTreeEntry> = (0..20)
            .map(|i| FileTreeEntry::directory(format!("d{}", i)))
            .chain((0..20).map(|i| FileTreeEntry::file(format!("f{}", i))))
            .collect();
        let summary = summarize_project_structure(&tree);
        let mut lines = summary.lines();
        assert_eq!(lines.next().unwrap().matches(", ").count(), MAX_TOP_LEVEL_DIRS - 1);
        assert_eq!(lines.next().unwrap().matches(", ").count(), MAX_TOP_LEVEL_FILES - 1);
    }

    #[test]
    fn test_empty_tree_summary() {
        assert_eq!(summarize_project_structure(&[]), "");
    }

    #[test]
    fn test_readme_headers() {
        let readme = "# Widget\r\nIntro\n## Install\n#notaheading\n### Usage\n";
        assert_eq!(
            summarize_existing_readme(Some(readme)).as_deref(),
            Some("Existing README sections: # Widget, ## Install, ### Usage")
        );
        assert_eq!(summarize_existing_readme(Some("no headings here")), None);
        assert_eq!(summarize_existing_readme(None), None);
    }

    #[test]
    fn test_readme_headers_capped() {
        let readme: String = (0..15).map(|i| format!("## Section {}\n", i)).collect();
        let summary = summarize_existing_readme(Some(&readme)).unwrap();
        assert!(summary.contains("## Section 9"));
        assert!(!summary.contains("## Section 10"));
    }

    #[test]
    fn test_config_summary() {
        assert_eq!(summarize_config_files(&[]), NO_CONFIG_FILES);

        let files = vec![
            ConfigFile {
                path: "go.mod".into(),
                content: "module example.com/widget".into(),
            },
            ConfigFile {
                path: "Makefile".into(),
                content: "é".repeat(300),
            },
        ];
        let summary = summarize_config_files(&files);
        let (first, second) = summary.split_once("\n\n").unwrap();
        assert_eq!(first, "go.mod: module example.com/widget...");
        assert_eq!(second.chars().count(), "Makefile: ".len() + CONFIG_PREVIEW_CHARS + 3);
    }
}

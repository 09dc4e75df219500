//! Workspace scanning and context gathering for chat requests.

pub mod project;

pub use project::{GitInfo, ProjectInfo};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

/// File extensions offered as chat context.
const INCLUDE_EXTENSIONS: &[&str] = &[
    "py", "js", "ts", "jsx", "tsx", "java", "cpp", "cc", "cxx", "c", "h", "hpp", "cs", "php",
    "rb", "go", "rs", "swift", "kt", "scala", "md", "txt", "json", "yaml", "yml", "xml", "html",
    "css",
];

/// Directory and file names never traversed or offered.
const EXCLUDE_NAMES: &[&str] = &[
    "node_modules",
    ".git",
    "__pycache__",
    ".vscode",
    ".idea",
    "build",
    "dist",
    "target",
    ".DS_Store",
    ".env",
];

const MAX_FILE_SIZE: u64 = 1024 * 1024;
const MAX_FILES: usize = 50;
const MAX_TREE_DEPTH: usize = 3;

/// A workspace file included in gathered context.
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub path: String,
    pub size: u64,
    pub content: String,
    pub language: Option<&'static str>,
    pub modified: DateTime<Utc>,
}

/// Directory structure down to a bounded depth.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Directory {
        truncated: bool,
        children: BTreeMap<String, TreeNode>,
    },
    File {
        size: u64,
    },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkspaceStats {
    pub total_files: usize,
    pub total_size: u64,
    pub file_types: BTreeMap<String, usize>,
}

/// Everything gathered about a workspace for one chat request.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceContext {
    pub path: String,
    pub structure: TreeNode,
    pub files: Vec<FileEntry>,
    pub git_info: Option<GitInfo>,
    pub project_info: ProjectInfo,
    pub stats: WorkspaceStats,
}

/// Context attached to a single chat request: explicitly named files plus
/// optional whole-workspace information.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatContext {
    pub workspace: String,
    pub files: Vec<ContextFile>,
    pub workspace_info: Option<WorkspaceContext>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContextFile {
    pub path: String,
    pub content: String,
    pub size: usize,
}

impl ChatContext {
    pub fn reference_paths(&self) -> Vec<String> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }
}

/// Scans a workspace directory for files, structure, and project metadata.
pub struct WorkspaceScanner {
    root: PathBuf,
}

impl WorkspaceScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Gather the full workspace context.
    pub fn workspace_context(&self) -> WorkspaceContext {
        let files = self.relevant_files();
        let stats = stats_for(&files);
        debug!(files = files.len(), "gathered workspace context");
        WorkspaceContext {
            path: self.root.display().to_string(),
            structure: self.directory_tree(),
            git_info: project::git_info(&self.root),
            project_info: project::project_info(&self.root),
            stats,
            files,
        }
    }

    /// Readable, UTF-8, size-bounded files under the root, newest first.
    pub fn relevant_files(&self) -> Vec<FileEntry> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_excluded_name(e.file_name()));
        for entry in walker {
            let Ok(entry) = entry else { continue };
            if !entry.file_type().is_file() || !has_included_extension(entry.path()) {
                continue;
            }
            let Ok(meta) = entry.metadata() else { continue };
            if meta.len() > MAX_FILE_SIZE {
                continue;
            }
            // Binary files fail the UTF-8 read and are skipped.
            let Ok(content) = fs::read_to_string(entry.path()) else {
                continue;
            };
            let path = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path())
                .display()
                .to_string();
            let modified = meta
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());
            files.push(FileEntry {
                path,
                size: meta.len(),
                language: detect_language(entry.path()),
                modified,
                content,
            });
        }
        files.sort_by(|a, b| b.modified.cmp(&a.modified).then(a.size.cmp(&b.size)));
        files.truncate(MAX_FILES);
        files
    }

    pub fn directory_tree(&self) -> TreeNode {
        build_tree(&self.root, 0)
    }
}

fn build_tree(path: &Path, depth: usize) -> TreeNode {
    if depth >= MAX_TREE_DEPTH {
        return TreeNode::Directory {
            truncated: true,
            children: BTreeMap::new(),
        };
    }
    let mut children = BTreeMap::new();
    if let Ok(entries) = fs::read_dir(path) {
        for entry in entries.flatten() {
            if is_excluded_name(&entry.file_name()) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let child_path = entry.path();
            if child_path.is_dir() {
                children.insert(name, build_tree(&child_path, depth + 1));
            } else {
                let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
                children.insert(name, TreeNode::File { size });
            }
        }
    }
    TreeNode::Directory {
        truncated: false,
        children,
    }
}

fn stats_for(files: &[FileEntry]) -> WorkspaceStats {
    let mut file_types = BTreeMap::new();
    for file in files {
        let extension = Path::new(&file.path)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_else(|| "no_extension".to_string());
        *file_types.entry(extension).or_insert(0) += 1;
    }
    WorkspaceStats {
        total_files: files.len(),
        total_size: files.iter().map(|f| f.size).sum(),
        file_types,
    }
}

fn is_excluded_name(name: &std::ffi::OsStr) -> bool {
    let name = name.to_string_lossy();
    EXCLUDE_NAMES.contains(&name.as_ref())
        || name.ends_with(".pyc")
        || name.ends_with(".log")
        || name.ends_with(".tmp")
        || name.starts_with(".env.")
}

fn has_included_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            INCLUDE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn detect_language(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    let language = match ext.as_str() {
        "py" => "python",
        "js" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "java" => "java",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp",
        "c" | "h" => "c",
        "cs" => "csharp",
        "php" => "php",
        "rb" => "ruby",
        "go" => "go",
        "rs" => "rust",
        "swift" => "swift",
        "kt" => "kotlin",
        "scala" => "scala",
        "md" => "markdown",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "xml" => "xml",
        "html" => "html",
        "css" => "css",
        _ => return None,
    };
    Some(language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace() -> (TempDir, WorkspaceScanner) {
        let dir = TempDir::new().unwrap();
        let scanner = WorkspaceScanner::new(dir.path());
        (dir, scanner)
    }

    #[test]
    fn relevant_files_picks_up_source_files() {
        let (dir, scanner) = workspace();
        fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();
        fs::write(dir.path().join("notes.md"), "# notes").unwrap();

        let files = scanner.relevant_files();
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert!(paths.contains(&"main.rs"));
        assert!(paths.contains(&"notes.md"));
    }

    #[test]
    fn excluded_directories_are_not_traversed() {
        let (dir, scanner) = workspace();
        fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        fs::write(dir.path().join("node_modules/pkg/index.js"), "x").unwrap();
        fs::write(dir.path().join("app.js"), "y").unwrap();

        let files = scanner.relevant_files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "app.js");
    }

    #[test]
    fn unknown_extensions_are_skipped() {
        let (dir, scanner) = workspace();
        fs::write(dir.path().join("binary.bin"), "data").unwrap();

        assert!(scanner.relevant_files().is_empty());
    }

    #[test]
    fn oversized_files_are_skipped() {
        let (dir, scanner) = workspace();
        fs::write(dir.path().join("big.txt"), "x".repeat(MAX_FILE_SIZE as usize + 1)).unwrap();
        fs::write(dir.path().join("small.txt"), "ok").unwrap();

        let files = scanner.relevant_files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "small.txt");
    }

    #[test]
    fn language_is_detected_from_extension() {
        let (dir, scanner) = workspace();
        fs::write(dir.path().join("lib.rs"), "pub fn f() {}").unwrap();

        let files = scanner.relevant_files();
        assert_eq!(files[0].language, Some("rust"));
    }

    #[test]
    fn directory_tree_is_depth_bounded() {
        let (dir, scanner) = workspace();
        fs::create_dir_all(dir.path().join("a/b/c/d")).unwrap();

        let TreeNode::Directory { children, .. } = scanner.directory_tree() else {
            panic!("root must be a directory");
        };
        let TreeNode::Directory { children, .. } = &children["a"] else {
            panic!("a must be a directory");
        };
        let TreeNode::Directory { children, .. } = &children["b"] else {
            panic!("b must be a directory");
        };
        let TreeNode::Directory { truncated, .. } = &children["c"] else {
            panic!("c must be a directory");
        };
        assert!(*truncated);
    }

    #[test]
    fn stats_count_extensions() {
        let (dir, scanner) = workspace();
        fs::write(dir.path().join("a.py"), "pass").unwrap();
        fs::write(dir.path().join("b.py"), "pass").unwrap();
        fs::write(dir.path().join("c.md"), "# c").unwrap();

        let context = scanner.workspace_context();
        assert_eq!(context.stats.total_files, 3);
        assert_eq!(context.stats.file_types[".py"], 2);
        assert_eq!(context.stats.file_types[".md"], 1);
    }
}

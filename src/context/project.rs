use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

use serde::Serialize;

/// Git metadata for the workspace, when the `git` binary and a repository
/// are both present.
#[derive(Debug, Clone, Serialize)]
pub struct GitInfo {
    pub branch: Option<String>,
    pub remote: Option<String>,
    pub recent_commits: Vec<String>,
}

/// Detected project type plus excerpts of the manifest files found.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectInfo {
    pub kind: String,
    pub manifests: BTreeMap<String, String>,
}

/// Manifest files probed at the workspace root. An empty kind collects the
/// manifest without claiming a project type.
const MANIFESTS: &[(&str, &str)] = &[
    ("package.json", "nodejs"),
    ("requirements.txt", "python"),
    ("Pipfile", "python"),
    ("pyproject.toml", "python"),
    ("Cargo.toml", "rust"),
    ("go.mod", "go"),
    ("pom.xml", "java"),
    ("build.gradle", "java"),
    ("CMakeLists.txt", ""),
    ("Makefile", ""),
    ("composer.json", ""),
    ("Gemfile", ""),
];

const MANIFEST_EXCERPT_CHARS: usize = 1000;

pub fn git_info(root: &Path) -> Option<GitInfo> {
    git(root, &["rev-parse", "--git-dir"])?;
    Some(GitInfo {
        branch: git(root, &["branch", "--show-current"]),
        remote: git(root, &["remote", "get-url", "origin"]),
        recent_commits: git(root, &["log", "--oneline", "-n", "5"])
            .map(|out| out.lines().map(str::to_string).collect())
            .unwrap_or_default(),
    })
}

fn git(root: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}

pub fn project_info(root: &Path) -> ProjectInfo {
    let mut kind = String::from("unknown");
    let mut manifests = BTreeMap::new();
    for (file_name, project_kind) in MANIFESTS {
        let Ok(content) = std::fs::read_to_string(root.join(file_name)) else {
            continue;
        };
        manifests.insert(
            file_name.to_string(),
            content.chars().take(MANIFEST_EXCERPT_CHARS).collect(),
        );
        if kind == "unknown" && !project_kind.is_empty() {
            kind = project_kind.to_string();
        }
    }
    ProjectInfo { kind, manifests }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn rust_project_detected_from_cargo_toml() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"x\"\n").unwrap();

        let info = project_info(dir.path());
        assert_eq!(info.kind, "rust");
        assert!(info.manifests.contains_key("Cargo.toml"));
    }

    #[test]
    fn empty_workspace_is_unknown() {
        let dir = TempDir::new().unwrap();
        let info = project_info(dir.path());
        assert_eq!(info.kind, "unknown");
        assert!(info.manifests.is_empty());
    }

    #[test]
    fn kindless_manifest_does_not_set_project_type() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Makefile"), "all:\n\ttrue\n").unwrap();

        let info = project_info(dir.path());
        assert_eq!(info.kind, "unknown");
        assert!(info.manifests.contains_key("Makefile"));
    }

    #[test]
    fn manifest_excerpt_is_bounded() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("go.mod"), "x".repeat(5000)).unwrap();

        let info = project_info(dir.path());
        assert_eq!(info.manifests["go.mod"].chars().count(), 1000);
    }

    #[test]
    fn git_info_is_none_outside_a_repository() {
        let dir = TempDir::new().unwrap();
        assert!(git_info(dir.path()).is_none());
    }
}

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;
use crate::core::parsers::ArtifactKind;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    /// Scannable artifacts, in lexical path order.
    pub files: BTreeSet<String>,
    pub skipped_count: usize,
}

pub fn scan_files(
    base_dir: &str,
    includes: &[String],
    ignore_patterns: &[String],
    ignore_test_files: bool,
    verbose: bool,
) -> ScanResult {
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignore_paths.push(Path::new(base_dir).join(p));
        }
    }

    if ignore_test_files {
        glob_patterns.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
    }

    let dirs_to_scan = if includes.is_empty() {
        vec![Path::new(base_dir).to_path_buf()]
    } else {
        resolve_includes(base_dir, includes, verbose)
    };

    for dir in dirs_to_scan {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if entry.file_type().is_file() && is_scannable_file(path) {
                files.insert(path_str.into_owned());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

fn resolve_includes(base_dir: &str, includes: &[String], verbose: bool) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for inc in includes {
        if is_glob_pattern(inc) {
            let full_pattern = Path::new(base_dir).join(inc);
            match glob(&full_pattern.to_string_lossy()) {
                Ok(entries) => paths.extend(entries.flatten().filter(|entry| entry.is_dir())),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid glob pattern '{}': {}",
                            "warning:".bold().yellow(),
                            inc,
                            e
                        );
                    }
                }
            }
        } else {
            let path = Path::new(base_dir).join(inc);
            if path.exists() {
                paths.push(path);
            } else if verbose {
                eprintln!(
                    "{} Include path does not exist: {}",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
        }
    }
    paths
}

fn is_scannable_file(path: &Path) -> bool {
    ArtifactKind::from_path(path).is_some()
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use crate::core::file_scanner::*;

    #[test]
    fn test_scan_markup_and_script_files() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("index.html")).unwrap();
        File::create(dir_path.join("app.js")).unwrap();
        File::create(dir_path.join("login.controller.ts")).unwrap();
        File::create(dir_path.join("style.css")).unwrap();

        let result = scan_files(dir_path.to_str().unwrap(), &[], &[], false, false);

        assert_eq!(result.files.len(), 3);
        assert!(result.files.iter().any(|f| f.ends_with("index.html")));
        assert!(result.files.iter().any(|f| f.ends_with("app.js")));
        assert!(!result.files.iter().any(|f| f.ends_with("style.css")));
    }

    #[test]
    fn test_scan_returns_lexical_order() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let views = dir_path.join("views");
        fs::create_dir(&views).unwrap();
        File::create(views.join("b.html")).unwrap();
        File::create(views.join("a.html")).unwrap();
        File::create(dir_path.join("z.js")).unwrap();
        File::create(dir_path.join("m.js")).unwrap();

        let result = scan_files(dir_path.to_str().unwrap(), &[], &[], false, false);

        let names: Vec<&str> = result
            .files
            .iter()
            .map(|f| f.strip_prefix(dir_path.to_str().unwrap()).unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["/m.js", "/views/a.html", "/views/b.html", "/z.js"]
        );
    }

    #[test]
    fn test_scan_ignores_node_modules() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let node_modules = dir_path.join("node_modules");
        fs::create_dir(&node_modules).unwrap();
        File::create(node_modules.join("angular-translate.js")).unwrap();

        File::create(dir_path.join("app.js")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &[],
            &["**/node_modules/**".to_owned()],
            false,
            false,
        );

        assert_eq!(result.files.len(), 1);
        assert!(!result.files.iter().any(|f| f.contains("node_modules")));
    }

    #[test]
    fn test_is_scannable_file() {
        assert!(is_scannable_file(Path::new("index.html")));
        assert!(is_scannable_file(Path::new("legacy.htm")));
        assert!(is_scannable_file(Path::new("app.js")));
        assert!(is_scannable_file(Path::new("app.ts")));
        assert!(is_scannable_file(Path::new("app.tsx")));
        assert!(!is_scannable_file(Path::new("style.css")));
        assert!(!is_scannable_file(Path::new("translations.json")));
        assert!(!is_scannable_file(Path::new("README.md")));
    }

    #[test]
    fn test_scan_with_includes() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let app = dir_path.join("app");
        fs::create_dir(&app).unwrap();
        File::create(app.join("main.html")).unwrap();

        let vendor = dir_path.join("vendor");
        fs::create_dir(&vendor).unwrap();
        File::create(vendor.join("lib.js")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &["app".to_owned()],
            &[],
            false,
            false,
        );

        assert_eq!(result.files.len(), 1);
        assert!(result.files.iter().any(|f| f.ends_with("app/main.html")));
    }

    #[test]
    fn test_scan_with_nonexistent_include() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let app = dir_path.join("app");
        fs::create_dir(&app).unwrap();
        File::create(app.join("main.js")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &["app".to_owned(), "nonexistent".to_owned()],
            &[],
            false,
            false,
        );

        assert_eq!(result.files.len(), 1);
    }

    #[test]
    fn test_scan_ignores_test_files() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("app.js")).unwrap();
        File::create(dir_path.join("app.spec.js")).unwrap();
        File::create(dir_path.join("login.test.ts")).unwrap();

        let tests_dir = dir_path.join("__tests__");
        fs::create_dir(&tests_dir).unwrap();
        File::create(tests_dir.join("fixture.html")).unwrap();

        let result = scan_files(dir_path.to_str().unwrap(), &[], &[], true, false);

        assert_eq!(result.files.len(), 1);
        assert!(result.files.iter().any(|f| f.ends_with("app.js")));
    }

    #[test]
    fn test_scan_includes_test_files_when_disabled() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("app.js")).unwrap();
        File::create(dir_path.join("app.spec.js")).unwrap();

        let result = scan_files(dir_path.to_str().unwrap(), &[], &[], false, false);

        assert_eq!(result.files.len(), 2);
    }

    #[test]
    fn test_scan_deduplicates_overlapping_includes() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let components = dir_path.join("app").join("components");
        fs::create_dir_all(&components).unwrap();
        File::create(components.join("header.html")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &["app".to_owned(), "app/components".to_owned()],
            &[],
            false,
            false,
        );

        assert_eq!(result.files.len(), 1);
    }

    #[test]
    fn test_scan_with_glob_include() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let login = dir_path.join("app").join("login");
        fs::create_dir_all(&login).unwrap();
        File::create(login.join("login.html")).unwrap();

        let home = dir_path.join("app").join("home");
        fs::create_dir_all(&home).unwrap();
        File::create(home.join("home.js")).unwrap();

        let lib = dir_path.join("lib");
        fs::create_dir(&lib).unwrap();
        File::create(lib.join("utils.js")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &["app/*".to_owned()],
            &[],
            false,
            false,
        );

        assert_eq!(result.files.len(), 2);
        assert!(!result.files.iter().any(|f| f.ends_with("utils.js")));
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("app/*"));
        assert!(is_glob_pattern("app/**/*.html"));
        assert!(is_glob_pattern("file?.js"));
        assert!(!is_glob_pattern("app"));
        assert!(!is_glob_pattern("app/[legacy]"));
    }

    #[test]
    fn test_scan_ignores_mixed_patterns() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let views = dir_path.join("app").join("views");
        fs::create_dir_all(&views).unwrap();
        File::create(views.join("main.html")).unwrap();
        File::create(views.join("main.min.js")).unwrap();

        let generated = dir_path.join("app").join("generated");
        fs::create_dir_all(&generated).unwrap();
        File::create(generated.join("templates.js")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &["app".to_owned()],
            &["app/generated".to_owned(), "**/*.min.js".to_owned()],
            false,
            false,
        );

        assert_eq!(result.files.len(), 1);
        assert!(result.files.iter().any(|f| f.ends_with("main.html")));
    }
}

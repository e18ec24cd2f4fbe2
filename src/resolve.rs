//! Module specifier resolution.
//!
//! Maps a raw specifier to a discovered file, trying strategies in a
//! fixed order so that the most literal interpretation wins:
//!
//! 1. exact path
//! 2. extension elision (`./utils` -> `utils.ts`, `./dir` -> `dir/index.ts`)
//! 3. sibling authoring file (`./lib.js` -> `lib.ts`)
//!
//! Anything else is external and resolves to `None`.

use path_clean::PathClean;
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffixes appended to an extensionless base, in priority order.
pub const PROBE_SUFFIXES: &[&str] = &[
    ".ts",
    ".js",
    ".tsx",
    ".jsx",
    ".json",
    "/index.ts",
    "/index.js",
];

/// The compiled-output extension that may stand in for an authored file.
pub const SCRIPT_EXTENSION: &str = ".js";

/// Authoring extensions tried in place of [`SCRIPT_EXTENSION`].
pub const AUTHORING_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".jsx"];

/// Resolves specifiers against the set of files discovered in one build.
pub struct PathResolver<'a> {
    root: &'a Path,
    known: &'a HashSet<PathBuf>,
}

impl<'a> PathResolver<'a> {
    pub fn new(root: &'a Path, known: &'a HashSet<PathBuf>) -> Self {
        Self { root, known }
    }

    /// Resolve `specifier` written in a file inside `origin_dir`.
    ///
    /// Only ever returns paths that are in the known set.
    pub fn resolve(&self, origin_dir: &Path, specifier: &str) -> Option<PathBuf> {
        if specifier.is_empty() {
            return None;
        }
        let base = self.base_candidate(origin_dir, specifier);

        if self.known.contains(&base) {
            return Some(base);
        }

        if let Some(hit) = PROBE_SUFFIXES
            .iter()
            .map(|suffix| with_suffix(&base, suffix))
            .find(|candidate| self.known.contains(candidate))
        {
            return Some(hit);
        }

        self.sibling_authoring_file(&base)
    }

    /// Relative specifiers resolve against the referencing file's
    /// directory; everything else is treated as root-relative.
    fn base_candidate(&self, origin_dir: &Path, specifier: &str) -> PathBuf {
        if is_relative(specifier) {
            origin_dir.join(specifier).clean()
        } else {
            self.root.join(specifier.trim_start_matches('/')).clean()
        }
    }

    fn sibling_authoring_file(&self, base: &Path) -> Option<PathBuf> {
        let text = base.to_str()?;
        let stem = text.strip_suffix(SCRIPT_EXTENSION)?;
        AUTHORING_EXTENSIONS
            .iter()
            .map(|ext| PathBuf::from(format!("{stem}{ext}")))
            .find(|candidate| self.known.contains(candidate))
    }
}

/// `.`/`..` or anything starting with `./` or `../`.
pub fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut raw = OsString::from(base.as_os_str());
    raw.push(suffix);
    PathBuf::from(raw).clean()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(root: &Path, files: &[&str]) -> HashSet<PathBuf> {
        files.iter().map(|f| root.join(f)).collect()
    }

    fn root() -> PathBuf {
        PathBuf::from("/project")
    }

    #[test]
    fn test_exact_match() {
        let root = root();
        let files = known(&root, &["src/a.ts", "src/b.ts"]);
        let resolver = PathResolver::new(&root, &files);
        assert_eq!(
            resolver.resolve(&root.join("src"), "./b.ts"),
            Some(root.join("src/b.ts"))
        );
    }

    #[test]
    fn test_extension_elision() {
        let root = root();
        let files = known(&root, &["index.ts", "utils.ts"]);
        let resolver = PathResolver::new(&root, &files);
        assert_eq!(
            resolver.resolve(&root, "./utils"),
            Some(root.join("utils.ts"))
        );
    }

    #[test]
    fn test_exact_beats_elision() {
        let root = root();
        let files = known(&root, &["utils", "utils.ts"]);
        let resolver = PathResolver::new(&root, &files);
        assert_eq!(resolver.resolve(&root, "./utils"), Some(root.join("utils")));
    }

    #[test]
    fn test_probe_priority() {
        let root = root();
        let files = known(&root, &["m.js", "m.tsx", "m.json"]);
        let resolver = PathResolver::new(&root, &files);
        assert_eq!(resolver.resolve(&root, "./m"), Some(root.join("m.js")));

        let files = known(&root, &["m.jsx", "m.json"]);
        let resolver = PathResolver::new(&root, &files);
        assert_eq!(resolver.resolve(&root, "./m"), Some(root.join("m.jsx")));
    }

    #[test]
    fn test_index_files() {
        let root = root();
        let files = known(&root, &["components/index.js", "lib/index.ts", "lib/index.js"]);
        let resolver = PathResolver::new(&root, &files);
        assert_eq!(
            resolver.resolve(&root, "./components"),
            Some(root.join("components/index.js"))
        );
        assert_eq!(
            resolver.resolve(&root, "./lib"),
            Some(root.join("lib/index.ts"))
        );
    }

    #[test]
    fn test_sibling_substitution() {
        let root = root();
        let files = known(&root, &["lib.ts", "view.tsx"]);
        let resolver = PathResolver::new(&root, &files);
        assert_eq!(resolver.resolve(&root, "./lib.js"), Some(root.join("lib.ts")));
        assert_eq!(
            resolver.resolve(&root, "./view.js"),
            Some(root.join("view.tsx"))
        );
    }

    #[test]
    fn test_literal_js_beats_sibling() {
        let root = root();
        let files = known(&root, &["lib.js", "lib.ts"]);
        let resolver = PathResolver::new(&root, &files);
        assert_eq!(resolver.resolve(&root, "./lib.js"), Some(root.join("lib.js")));
    }

    #[test]
    fn test_parent_directory() {
        let root = root();
        let files = known(&root, &["shared/config.ts", "app/main.ts"]);
        let resolver = PathResolver::new(&root, &files);
        assert_eq!(
            resolver.resolve(&root.join("app"), "../shared/config"),
            Some(root.join("shared/config.ts"))
        );
    }

    #[test]
    fn test_bare_specifier_is_root_relative() {
        let root = root();
        let files = known(&root, &["src/utils.ts", "src/deep/x.ts"]);
        let resolver = PathResolver::new(&root, &files);
        assert_eq!(
            resolver.resolve(&root.join("src/deep"), "src/utils"),
            Some(root.join("src/utils.ts"))
        );
        assert_eq!(
            resolver.resolve(&root.join("src/deep"), "/src/utils"),
            Some(root.join("src/utils.ts"))
        );
    }

    #[test]
    fn test_external_is_unresolved() {
        let root = root();
        let files = known(&root, &["index.ts"]);
        let resolver = PathResolver::new(&root, &files);
        assert_eq!(resolver.resolve(&root, "react"), None);
        assert_eq!(resolver.resolve(&root, "./ghost"), None);
        assert_eq!(resolver.resolve(&root, ""), None);
    }

    #[test]
    fn test_is_relative() {
        assert!(is_relative("./a"));
        assert!(is_relative("../a"));
        assert!(is_relative(".."));
        assert!(!is_relative(".hidden"));
        assert!(!is_relative("lodash/fp"));
    }
}

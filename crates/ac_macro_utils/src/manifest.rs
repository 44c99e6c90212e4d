use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item};

const FACADE_NAME: &str = "anycbor";
const CRATE_PREFIX: &str = "ac_";
const DEPENDENCY_TABLES: [&str; 2] = ["dependencies", "dev-dependencies"];

/// The parsed `Cargo.toml` of the crate invoking a derive macro.
///
/// Generated code names items of `ac_reflect`, and the invoking crate may
/// reach it directly or only through the `anycbor` facade. `Manifest`
/// answers which path to emit.
///
/// # Resolution
///
/// For each of `dependencies` then `dev-dependencies`:
///
/// - `name` listed: `::name`.
/// - `name` starts with `ac_` and `anycbor` is listed: `::anycbor::rest`,
///   so `ac_reflect` becomes `::anycbor::reflect`.
///
/// Nothing found: `::name`. Crates naming themselves should declare
/// `extern crate self as ac_reflect;`.
///
/// # Example
///
/// ```rust
/// # use ac_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("ac_reflect"));
/// ```
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

impl Manifest {
    /// Returns the path under which the caller sees the package `name`.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        let facade_module = name.strip_prefix(CRATE_PREFIX);

        let found = DEPENDENCY_TABLES.iter().find_map(|table| {
            let Some(Item::Table(deps)) = self.manifest.get(table) else {
                return None;
            };
            if deps.contains_key(name) {
                Some(format!("::{name}"))
            } else if deps.contains_key(FACADE_NAME) {
                facade_module.map(|module| format!("::{FACADE_NAME}::{module}"))
            } else {
                None
            }
        });

        let text = found.unwrap_or_else(|| format!("::{name}"));
        syn::parse_str(&text).unwrap_or_else(|_| panic!("`{text}` is not a valid path"))
    }

    fn load(path: PathBuf, modified_time: SystemTime) -> Self {
        let text = std::fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()));
        let manifest = Document::parse(text.into_boxed_str())
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()));
        Self { manifest, modified_time }
    }

    /// Runs `func` with the manifest of the crate being compiled.
    ///
    /// Parsed manifests are cached by path until the file's modified time
    /// changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static CACHE: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = std::env::var_os("CARGO_MANIFEST_DIR")
            .map(|dir| PathBuf::from(dir).join("Cargo.toml"))
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
        let modified_time = std::fs::metadata(&path)
            .and_then(|metadata| metadata.modified())
            .unwrap_or_else(|_| panic!("No modified time for {}", path.display()));

        {
            let cache = CACHE.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = cache.get(&path)
                && cached.modified_time == modified_time
            {
                return func(cached);
            }
        }

        let mut cache = CACHE.write().unwrap_or_else(PoisonError::into_inner);
        let manifest = Self::load(path.clone(), modified_time);
        let result = func(&manifest);
        cache.insert(path, manifest);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(toml: &str) -> String {
        let manifest = Manifest {
            manifest: Document::parse(Box::<str>::from(toml)).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        };
        let path = manifest.get_crate_path("ac_reflect");
        path.segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect::<Vec<_>>()
            .join("::")
    }

    #[test]
    fn resolution() {
        assert_eq!(resolve("[dependencies]\nac_reflect = \"0.0.1\"\n"), "ac_reflect");
        assert_eq!(resolve("[dev-dependencies]\nanycbor = \"0.0.1\"\n"), "anycbor::reflect");
        assert_eq!(resolve("[package]\nname = \"x\"\n"), "ac_reflect");
    }
}

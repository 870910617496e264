use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::core::LibraryLoader;

/// Source file extension of the handler files this wrapper fronts.
const SOURCE_EXTENSION: &str = "rb";

static REQUIRE_RE: OnceLock<Regex> = OnceLock::new();

fn require_re() -> &'static Regex {
    REQUIRE_RE.get_or_init(|| Regex::new(r#"(?m)^\s*require\s+['"]([^'"]+)['"]"#).unwrap())
}

/// Result of a preload pass. The caller decides how to report it, so that
/// warnings are not lost before the telemetry subscriber is installed.
#[derive(Debug, PartialEq, Eq)]
pub enum PreloadOutcome {
    /// The handler file was found and every extracted library was attempted.
    Loaded {
        handler_file: String,
        failures: Vec<(String, String)>,
    },
    /// The handler identifier was absent or its file does not exist.
    HandlerNotFound,
}

/// The first non-empty handler identifier from the environment.
pub fn handler_id_from_env() -> Option<String> {
    ["ORIG_HANDLER", "_HANDLER"]
        .iter()
        .find_map(|name| env::var(name).ok().filter(|value| !value.is_empty()))
}

/// The file portion of a `<file>.<entrypoint>` handler identifier.
pub fn handler_file_name(handler_id: &str) -> &str {
    handler_id.split('.').next().unwrap_or(handler_id)
}

/// Force-loads the libraries the original handler declares, so that
/// instrumentation installed afterwards still observes their initialization.
/// Loading is best-effort per library; one failure never aborts the rest.
pub fn preload_function_dependencies<L: LibraryLoader>(
    task_root: &Path,
    handler_id: Option<&str>,
    loader: &mut L,
) -> PreloadOutcome {
    let Some(handler_id) = handler_id else {
        return PreloadOutcome::HandlerNotFound;
    };

    let handler_file = handler_file_name(handler_id);
    let path = task_root.join(format!("{handler_file}.{SOURCE_EXTENSION}"));
    let Ok(bytes) = fs::read(&path) else {
        return PreloadOutcome::HandlerNotFound;
    };

    let source = sanitize_source(&bytes);

    let mut failures = Vec::new();
    for library in required_libraries(&source) {
        if let Err(message) = loader.load_library(&library) {
            failures.push((library, message));
        }
    }

    PreloadOutcome::Loaded {
        handler_file: handler_file.to_string(),
        failures,
    }
}

/// Interprets the raw bytes as UTF-8, stripping a leading byte-order mark
/// and replacing invalid sequences so mixed encodings never raise.
fn sanitize_source(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Top-level literal `require` declarations, in order of appearance with
/// duplicates kept. Conditional or computed requires are never seen here.
pub fn required_libraries(source: &str) -> Vec<String> {
    require_re()
        .captures_iter(source)
        .map(|captures| captures[1].to_string())
        .collect()
}

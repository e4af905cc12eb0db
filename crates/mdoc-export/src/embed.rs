//! Inline local images as base64 data URIs.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::{Captures, Regex};

/// `src` attribute of an `<img>` tag; group 2 is the value.
static IMG_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(<img\b[^>]*?\bsrc=")([^"]+)""#).unwrap());

/// MIME type for an image path, by extension.
fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "image/png",
    }
}

/// Resolve `.` and `..` without touching the file system.
fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Resolve an `src` value against `base_dir`.
fn resolve_src(src: &str, base_dir: &Path) -> PathBuf {
    let src = src.replace('\\', "/");
    let path = Path::new(&src);
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&base_dir.join(path))
    }
}

/// Replace every local `<img src>` with a data URI.
///
/// `data:` sources are left alone. Relative paths are resolved against
/// `base_dir`. Images that can't be read are logged and left unchanged.
#[must_use]
pub fn embed_images_as_base64(html: &str, base_dir: &Path) -> String {
    IMG_SRC
        .replace_all(html, |caps: &Captures<'_>| {
            let src = &caps[2];
            if src.starts_with("data:") {
                return caps[0].to_owned();
            }

            let path = resolve_src(src, base_dir);
            let data = match std::fs::read(&path) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Image not embedded");
                    return caps[0].to_owned();
                }
            };

            tracing::info!(path = %path.display(), "Embedding image");
            format!(
                "{}data:{};base64,{}\"",
                &caps[1],
                mime_type(&path),
                STANDARD.encode(data)
            )
        })
        .into_owned()
}

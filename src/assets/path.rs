//! Request target → filesystem path.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

use crate::assets::error::AssetError;

/// Per-request state, filled in as the target moves through the pipeline.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Raw request target as received, query string included
    pub target: String,
    /// Percent-decoded path, once decoding succeeded
    pub decoded: Option<String>,
    /// Absolute path beneath the root, once it passed the traversal guard
    pub resolved: Option<PathBuf>,
}

impl RequestContext {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            decoded: None,
            resolved: None,
        }
    }

    pub fn decode(&mut self) -> Result<&str, AssetError> {
        let decoded = decode_target(&self.target)?;
        Ok(self.decoded.insert(decoded).as_str())
    }

    /// Normalizes the decoded path, joins it onto `root` and checks the
    /// result is contained in it. Decodes first if that has not happened.
    pub fn resolve(&mut self, root: &Path, default_document: &str) -> Result<&Path, AssetError> {
        let decoded = match self.decoded.clone() {
            Some(decoded) => decoded,
            None => self.decode()?.to_string(),
        };

        let candidate = resolve(root, normalize(&decoded, default_document));
        if !is_within(root, &candidate) {
            return Err(AssetError::Forbidden);
        }

        Ok(self.resolved.insert(candidate).as_path())
    }
}

/// Strips the query string and fragment from `target` and percent-decodes
/// what remains.
///
/// Fails on a `%` not followed by two hex digits, on decoded bytes that are
/// not UTF-8, and on an embedded NUL.
pub fn decode_target(target: &str) -> Result<String, AssetError> {
    let path = target
        .find(['?', '#'])
        .map_or(target, |end| &target[..end]);

    check_escapes(path)?;

    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map_err(|_| AssetError::MalformedRequest("decoded path is not UTF-8".into()))?;

    if decoded.contains('\0') {
        return Err(AssetError::MalformedRequest("NUL byte in path".into()));
    }

    Ok(decoded.into_owned())
}

fn check_escapes(path: &str) -> Result<(), AssetError> {
    let bytes = path.as_bytes();
    let mut pos = 0;

    while let Some(offset) = bytes[pos..].iter().position(|&b| b == b'%') {
        let at = pos + offset;
        let valid = bytes
            .get(at + 1..at + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(AssetError::MalformedRequest(format!(
                "invalid percent-escape at byte {}",
                at
            )));
        }
        pos = at + 3;
    }

    Ok(())
}

/// The bare root `/` becomes the default document; everything else is
/// left alone.
pub fn normalize<'a>(decoded: &'a str, default_document: &'a str) -> &'a str {
    if decoded == "/" {
        default_document
    } else {
        decoded
    }
}

/// Joins `request_path` onto `root`, resolving `.` and `..` lexically.
///
/// A `..` may climb above `root`; the caller decides what to do with a
/// result that is no longer inside it.
pub fn resolve(root: &Path, request_path: &str) -> PathBuf {
    let mut resolved = root.to_path_buf();

    for segment in request_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                resolved.pop();
            }
            name => resolved.push(name),
        }
    }

    resolved
}

/// Whether `candidate` is `root` or lies beneath it.
///
/// Compares whole path components, so `/srv/app-evil` is not inside
/// `/srv/app`.
pub fn is_within(root: &Path, candidate: &Path) -> bool {
    candidate.starts_with(root)
}

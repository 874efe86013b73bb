/// Result of validating a flat filename.
#[derive(Debug, PartialEq, Eq)]
pub enum FilenameError {
    /// Filename is empty or whitespace-only.
    Empty,
    /// Filename contains path separators (`/` or `\`).
    ContainsPathSeparator,
    /// Filename contains path traversal patterns (`..`).
    PathTraversal,
    /// Filename contains null bytes.
    NullByte,
    /// Filename starts with a dot (hidden file).
    Hidden,
    /// Filename contains control characters (CR, LF, etc.).
    ControlCharacter,
    /// Extension is not a short ASCII-alphanumeric suffix.
    InvalidExtension,
}

impl FilenameError {
    /// Returns a human-readable error message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Filename cannot be empty",
            Self::ContainsPathSeparator => "Invalid filename: path separators are not allowed",
            Self::PathTraversal => "Invalid filename: '..' is not allowed",
            Self::NullByte => "Invalid filename: null bytes are not allowed",
            Self::Hidden => "Invalid filename: hidden files (starting with '.') are not allowed",
            Self::ControlCharacter => "Invalid filename: control characters are not allowed",
            Self::InvalidExtension => {
                "Invalid filename: extension must be 1-16 ASCII letters or digits"
            }
        }
    }
}

/// Longest accepted extension, excluding the leading dot.
pub const MAX_EXTENSION_LEN: usize = 16;

/// Validates a flat filename (no directory components allowed).
pub fn validate_flat_filename(filename: &str) -> Result<&str, FilenameError> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(FilenameError::Empty);
    }

    if trimmed.contains('\0') {
        return Err(FilenameError::NullByte);
    }

    // CR/LF in a filename would leak into response headers.
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(FilenameError::ControlCharacter);
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(FilenameError::ContainsPathSeparator);
    }

    if trimmed == ".." {
        return Err(FilenameError::PathTraversal);
    }

    if trimmed.starts_with('.') {
        return Err(FilenameError::Hidden);
    }

    Ok(trimmed)
}

/// Checks whether `extension` is empty or a dot followed by 1-16 ASCII
/// letters/digits, i.e. safe to append to a generated filename.
pub fn is_safe_extension(extension: &str) -> bool {
    if extension.is_empty() {
        return true;
    }
    match extension.strip_prefix('.') {
        Some(ext) => {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        }
        None => false,
    }
}

/// Checks that `path` is `<prefix>/<flat filename>`.
///
/// This is a purely lexical check. Anything with extra directory levels,
/// traversal segments, hidden names or surrounding whitespace is rejected,
/// so a contained path can never name a file outside the upload directory.
pub fn is_contained(prefix: &str, path: &str) -> bool {
    contained_filename(prefix, path).is_some()
}

/// Returns the filename part of a contained path, or `None` if `path` is not
/// contained in `prefix`.
pub fn contained_filename<'a>(prefix: &str, path: &'a str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    let name = path.strip_prefix(prefix)?.strip_prefix('/')?;
    match validate_flat_filename(name) {
        Ok(valid) if valid == name => Some(name),
        _ => None,
    }
}

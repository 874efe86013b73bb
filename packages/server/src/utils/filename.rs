use common::storage::path::{FilenameError, is_safe_extension, validate_flat_filename};

/// Extract the extension (with its leading dot) from a client-supplied upload
/// filename.
///
/// Browsers may send a full client path (`C:\fakepath\poster.png`), so only
/// the last component is considered. A name without an extension yields `""`.
pub fn upload_extension(file_name: &str) -> Result<String, FilenameError> {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    let base = validate_flat_filename(base)?;

    let extension = match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!(".{ext}"),
        _ => String::new(),
    };

    if !is_safe_extension(&extension) {
        return Err(FilenameError::InvalidExtension);
    }
    Ok(extension)
}

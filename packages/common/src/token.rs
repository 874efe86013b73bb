use rand::{Rng, distr::Alphanumeric};

/// Length of the random token embedded in generated image filenames.
pub const TOKEN_LENGTH: usize = 16;

/// Prefix shared by every generated image filename.
pub const IMAGE_FILENAME_PREFIX: &str = "img_";

/// Generate a random token of `len` characters drawn from `[a-zA-Z0-9]`.
pub fn random_token(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Build a fresh image filename: `img_<16 random chars><extension>`.
///
/// `extension` is appended verbatim and is expected to include its leading
/// dot (or be empty). Uniqueness is probabilistic (62^16 space); collisions
/// are not checked.
pub fn unique_image_filename(extension: &str) -> String {
    format!(
        "{IMAGE_FILENAME_PREFIX}{}{extension}",
        random_token(TOKEN_LENGTH)
    )
}

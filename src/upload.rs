//! Media uploads attached to a publish request.

use crate::config::UPLOADS;
use crate::models::Media;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use unicode_normalization::UnicodeNormalization;

pub const ALLOWED_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "gif", "mp4", "mov", "avi", "webm"];

/// A `files[]` part being spooled to a temporary file inside the upload
/// directory. Dropping it before `store_uploads` removes the temporary file.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    file: NamedTempFile,
}

impl UploadedFile {
    /// Starts spooling a part named `client_filename` by the browser, or
    /// returns `None` when the part is not an acceptable upload.
    pub fn create(dir: &Path, client_filename: &str) -> io::Result<Option<Self>> {
        if !allowed_file(client_filename) {
            log::debug!("skipping upload {:?}: extension not allowed", client_filename);
            return Ok(None);
        }
        let filename = secure_filename(client_filename);
        if filename.is_empty() {
            log::debug!("skipping upload {:?}: empty after sanitizing", client_filename);
            return Ok(None);
        }
        let file = NamedTempFile::new_in(dir)?;
        Ok(Some(Self { filename, file }))
    }

    pub fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.file.write_all(chunk)
    }

    fn persist(self, dir: &Path) -> io::Result<String> {
        self.file.persist(dir.join(&self.filename))?;
        Ok(format!("{}/{}", UPLOADS, self.filename))
    }
}

/// Checks the text after the last `.` against the allow-list, ignoring case.
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, extension)) => {
            let extension = extension.to_lowercase();
            ALLOWED_EXTENSIONS.contains(&extension.as_str())
        }
        None => false,
    }
}

/// Reduces a client supplied filename to `[A-Za-z0-9_.-]` so it can be
/// joined to the upload directory without escaping it. Accented letters keep
/// their base letter.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let safe: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    safe.trim_matches(|c| c == '.' || c == '_').to_owned()
}

pub fn ensure_upload_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

/// Moves the spooled files to their sanitized names inside `dir` and returns
/// their media paths in submission order. A file whose sanitized name is
/// already taken replaces the earlier one.
pub fn store_uploads(dir: &Path, files: Vec<UploadedFile>) -> io::Result<Media> {
    let paths = files
        .into_iter()
        .map(|file| file.persist(dir))
        .collect::<io::Result<Vec<_>>>()?;
    Ok(Media::new(paths))
}

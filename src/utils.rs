use std::path::Path;

use tokio::{fs, io};

const TITLE_MAX_CHARS: usize = 50;
const FALLBACK_STEM: &str = "video";

/// Plain substring check, no URL parsing.
pub fn is_youtube_link(text: &str) -> bool {
    text.contains("youtube.com") || text.contains("youtu.be")
}

/// Keep the first 50 characters of the title, then drop everything except
/// alphanumerics, spaces, `-`, `_` and `.`.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .take(TITLE_MAX_CHARS)
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// File name for a request's temporary video. The request id keeps concurrent
/// requests for the same title apart.
pub fn temp_file_name(title: &str, request_id: &str) -> String {
    let stem = sanitize_title(title);
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem.as_str() };
    format!("{stem}_{request_id}.mp4")
}

/// Whether `name` has the shape produced by [`temp_file_name`]:
/// `<stem>_<8 lowercase hex>.mp4`.
pub fn is_temp_file_name(name: &str) -> bool {
    let Some(stem) = name.strip_suffix(".mp4") else {
        return false;
    };
    let Some((_, id)) = stem.rsplit_once('_') else {
        return false;
    };
    id.len() == 8 && id.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
}

/// Remove leftover request files from `dir`. Anything else in the directory,
/// and the directory itself, is left alone. Returns how many files were removed.
pub async fn clear_temp_files(dir: impl AsRef<Path>) -> io::Result<usize> {
    let mut entries = match fs::read_dir(dir.as_ref()).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let mut removed = 0;
    while let Some(entry) = entries.next_entry().await? {
        let is_ours = entry.file_name().to_str().is_some_and(is_temp_file_name);
        if is_ours && entry.file_type().await?.is_file() {
            fs::remove_file(entry.path()).await?;
            removed += 1;
        }
    }
    Ok(removed)
}

//! Cover art loading
//!
//! Reads cover art from embedded metadata or an image next to the track.
//! The bytes end up in the timed cover cache; decoding them is the
//! renderer's business.

use anyhow::{Context, Result};
use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use std::fs;
use std::path::{Path, PathBuf};

/// Cover image bytes with their MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverArt {
    pub data: Vec<u8>,
    pub mime: String,
}

/// Common cover art filenames to search for (in priority order)
const COVER_FILENAMES: &[&str] = &["cover", "folder", "front", "albumart", "album"];

/// Supported image extensions
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

fn mime_for_extension(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "image/jpeg",
    }
}

/// Load cover art for an audio file
///
/// Priority:
/// 1. Embedded in audio file
/// 2. Same-name image file
/// 3. Common cover filenames in same directory
pub fn load_cover(audio_path: &Path) -> Result<Option<CoverArt>> {
    if let Some(embedded) = extract_embedded_art(audio_path) {
        return Ok(Some(embedded));
    }

    let Some(path) =
        find_same_name_image(audio_path).or_else(|| find_common_cover_file(audio_path))
    else {
        return Ok(None);
    };

    let data = fs::read(&path).with_context(|| format!("Failed to read cover {:?}", path))?;
    Ok(Some(CoverArt {
        data,
        mime: mime_for_extension(&path).to_string(),
    }))
}

/// Extract embedded cover art from audio file
fn extract_embedded_art(audio_path: &Path) -> Option<CoverArt> {
    let tagged_file = Probe::open(audio_path).ok()?.read().ok()?;

    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())?;

    let picture = tag.pictures().first()?;
    Some(CoverArt {
        data: picture.data().to_vec(),
        mime: picture
            .mime_type()
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "image/jpeg".to_string()),
    })
}

/// Find image file with same name as audio file
fn find_same_name_image(audio_path: &Path) -> Option<PathBuf> {
    let parent = audio_path.parent()?;
    let stem = audio_path.file_stem()?.to_str()?;

    IMAGE_EXTENSIONS
        .iter()
        .flat_map(|ext| [ext.to_string(), ext.to_uppercase()])
        .map(|ext| parent.join(format!("{}.{}", stem, ext)))
        .find(|p| p.exists())
}

/// Find common cover art file in same directory
fn find_common_cover_file(audio_path: &Path) -> Option<PathBuf> {
    let parent = audio_path.parent()?;

    for filename in COVER_FILENAMES {
        let capitalized = format!("{}{}", filename[..1].to_uppercase(), &filename[1..]);
        for ext in IMAGE_EXTENSIONS {
            let candidates = [
                format!("{}.{}", filename, ext),
                format!("{}.{}", capitalized, ext),
                format!("{}.{}", filename.to_uppercase(), ext.to_uppercase()),
            ];
            if let Some(path) = candidates
                .iter()
                .map(|name| parent.join(name))
                .find(|p| p.exists())
            {
                return Some(path);
            }
        }
    }

    None
}

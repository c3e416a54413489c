use super::*;

use anyhow::anyhow;
use rocket::fs::TempFile;

/// Reads an uploaded image file into memory.
///
/// Anything that does not declare an `image/*` content type is
/// rejected up front. Size limits are enforced later together with
/// the other listing validations.
pub async fn read_uploaded_image(
    file: &mut TempFile<'_>,
) -> result::Result<Vec<u8>, ApiError> {
    let is_image = file
        .content_type()
        .map(|ct| ct.top() == "image")
        .unwrap_or(false);
    if !is_image {
        return Err(ApiError::OtherWithStatus(
            anyhow!("Uploaded file is not an image"),
            Status::UnsupportedMediaType,
        ));
    }
    // The file may still be buffered in memory, so go through a
    // temporary path before reading the bytes back.
    let tmp_path = std::env::temp_dir().join(format!("guia-upload-{}", Id::new()));
    file.copy_to(&tmp_path).await?;
    let bytes = rocket::tokio::fs::read(&tmp_path).await?;
    let _ = rocket::tokio::fs::remove_file(&tmp_path).await;
    Ok(bytes)
}

pub fn parse_id_list(ids: Option<&str>) -> Vec<Id> {
    ids.map(crate::core::util::split_ids)
        .unwrap_or_default()
        .into_iter()
        .map(Id::from)
        .collect()
}

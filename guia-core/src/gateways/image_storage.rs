use anyhow::Result as Fallible;

use guia_entities::listing::ImageRef;

/// Access to the external image store.
///
/// Uploaded images live under hierarchical public ids
/// (e.g. `listings/<listing-id>/cover`). All operations are
/// synchronous and may fail independently of the database.
pub trait ImageStorageGateway {
    fn upload_image(&self, public_id: &str, bytes: &[u8]) -> Fallible<ImageRef>;

    /// Moves an image to a new public id, keeping its content.
    fn rename_image(&self, from_public_id: &str, to_public_id: &str) -> Fallible<ImageRef>;

    fn delete_image(&self, public_id: &str) -> Fallible<()>;

    /// Deletes all images whose public id starts with the given prefix,
    /// including the folder itself if the store tracks folders.
    fn delete_image_folder(&self, prefix: &str) -> Fallible<()>;
}

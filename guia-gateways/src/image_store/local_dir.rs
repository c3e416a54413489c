use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Result;

use guia_core::entities::ImageRef;

use super::ImageStorageGateway;

/// Image store backed by a local directory.
///
/// Meant for development setups without an external media
/// service. Public ids map directly to file paths below the
/// root directory.
#[derive(Debug, Clone)]
pub struct DirImageStore {
    root: PathBuf,
    base_url: String,
}

impl DirImageStore {
    pub fn try_new<P: AsRef<Path>>(root: P, base_url: impl Into<String>) -> io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            base_url: base_url.into(),
        })
    }

    fn file_path(&self, public_id: &str) -> PathBuf {
        self.root.join(public_id)
    }

    fn image_ref(&self, public_id: &str) -> ImageRef {
        ImageRef {
            url: format!("{}/{public_id}", self.base_url),
            public_id: public_id.into(),
        }
    }
}

impl ImageStorageGateway for DirImageStore {
    fn upload_image(&self, public_id: &str, bytes: &[u8]) -> Result<ImageRef> {
        let path = self.file_path(public_id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        Ok(self.image_ref(public_id))
    }

    fn rename_image(&self, from_public_id: &str, to_public_id: &str) -> Result<ImageRef> {
        let to_path = self.file_path(to_public_id);
        if let Some(parent) = to_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::rename(self.file_path(from_public_id), &to_path)?;
        Ok(self.image_ref(to_public_id))
    }

    fn delete_image(&self, public_id: &str) -> Result<()> {
        fs::remove_file(self.file_path(public_id))?;
        Ok(())
    }

    fn delete_image_folder(&self, prefix: &str) -> Result<()> {
        match fs::remove_dir_all(self.file_path(prefix)) {
            Ok(()) => Ok(()),
            // Nothing left to clean up
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_store() -> DirImageStore {
        let root = std::env::temp_dir().join(format!(
            "guia-image-store-{}",
            guia_core::entities::Id::new()
        ));
        DirImageStore::try_new(root, "http://localhost:8000/media").unwrap()
    }

    #[test]
    fn upload_rename_and_delete() {
        let store = new_store();
        let image = store.upload_image("listings/abc/cover", &[1, 2, 3]).unwrap();
        assert_eq!("listings/abc/cover", image.public_id);
        assert_eq!("http://localhost:8000/media/listings/abc/cover", image.url);
        assert!(store.file_path("listings/abc/cover").exists());

        let moved = store
            .rename_image("listings/abc/cover", "listings/def/cover")
            .unwrap();
        assert_eq!("listings/def/cover", moved.public_id);
        assert!(!store.file_path("listings/abc/cover").exists());
        assert!(store.file_path("listings/def/cover").exists());

        store.delete_image("listings/def/cover").unwrap();
        assert!(!store.file_path("listings/def/cover").exists());
        assert!(store.delete_image("listings/def/cover").is_err());
    }

    #[test]
    fn delete_folder_is_idempotent() {
        let store = new_store();
        store.upload_image("listings/abc/cover", &[1]).unwrap();
        store.upload_image("listings/abc/gallery-0", &[2]).unwrap();
        store.delete_image_folder("listings/abc").unwrap();
        assert!(!store.file_path("listings/abc").exists());
        store.delete_image_folder("listings/abc").unwrap();
    }
}

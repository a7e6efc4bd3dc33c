use jabaki_atoms::photos::{folder_key, photo_key, FolderPhotos, PhotoManifest};
use std::path::Path;

use crate::drive::DriveFile;
use crate::error::{DriveError, Result};

/// Where folder and image listings come from. `DriveClient` in production.
#[allow(async_fn_in_trait)]
pub trait PhotoSource {
    /// Id of the first folder named exactly `folder_name`
    async fn find_folder(&self, folder_name: &str) -> Result<Option<String>>;

    /// Image files inside the folder
    async fn list_images(&self, folder_id: &str) -> Result<Vec<DriveFile>>;
}

/// Scan `folders` in order. Folders that do not exist are skipped with a warning.
pub async fn build_manifest<S: PhotoSource>(
    source: &S,
    folders: &[String],
    key_order: &[String],
) -> Result<PhotoManifest> {
    let mut manifest = PhotoManifest::new();

    for folder_name in folders {
        let Some(folder_id) = source.find_folder(folder_name).await? else {
            tracing::warn!("⚠️ Folder not found on Drive, skipping: {}", folder_name);
            continue;
        };

        let files = source.list_images(&folder_id).await?;
        let mut photos = FolderPhotos::new();
        for file in files {
            photos.insert(photo_key(&file.name), file.id);
        }
        photos.apply_key_order(key_order);

        let key = folder_key(folder_name);
        tracing::info!("📁 {} -> {}: {} photos", folder_name, key, photos.len());
        manifest.insert_folder(key, photos);
    }

    Ok(manifest)
}

/// Write the manifest (4-space JSON), creating parent directories
pub async fn write_manifest(path: &Path, manifest: &PhotoManifest) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DriveError::io(format!("creating {}", parent.display()), e))?;
    }

    let raw = manifest
        .to_pretty_json()
        .map_err(|e| DriveError::json("photo manifest", e))?;
    tokio::fs::write(path, raw)
        .await
        .map_err(|e| DriveError::io(format!("writing {}", path.display()), e))
}

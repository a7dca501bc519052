// Tests for the directory-backed media library

use anyhow::Result;
use media_compress::{Collections, DirectoryLibrary, MediaKind, MediaLibrary};
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_request_access_creates_root() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path().join("gallery").join("nested");
    let library = DirectoryLibrary::new(&root);

    library.request_access().await?;

    assert!(root.is_dir());
    Ok(())
}

#[tokio::test]
async fn test_create_asset_copies_into_collection() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("out_compressed_image_rle.tiff");
    fs::write(&source, b"compressed bytes")?;

    let library = DirectoryLibrary::new(temp_dir.path().join("library"));
    library.request_access().await?;
    let asset = library.create_asset(&source, "Images").await?;

    assert_eq!(asset.collection, "Images");
    assert_eq!(
        asset.path,
        temp_dir
            .path()
            .join("library")
            .join("Images")
            .join("out_compressed_image_rle.tiff")
    );
    assert_eq!(fs::read(&asset.path)?, b"compressed bytes");
    // The source stays where it was
    assert!(source.exists());
    Ok(())
}

#[tokio::test]
async fn test_same_file_name_never_overwrites() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let first = temp_dir.path().join("one").join("song.mp3");
    let second = temp_dir.path().join("two").join("song.mp3");
    fs::create_dir_all(first.parent().unwrap())?;
    fs::create_dir_all(second.parent().unwrap())?;
    fs::write(&first, b"first")?;
    fs::write(&second, b"second")?;

    let library = DirectoryLibrary::new(temp_dir.path().join("library"));
    library.request_access().await?;
    let a1 = library.create_asset(&first, "Audio").await?;
    let a2 = library.create_asset(&second, "Audio").await?;
    let a3 = library.create_asset(&first, "Audio").await?;

    let audio = temp_dir.path().join("library").join("Audio");
    assert_eq!(a1.path, audio.join("song.mp3"));
    assert_eq!(a2.path, audio.join("song-1.mp3"));
    assert_eq!(a3.path, audio.join("song-2.mp3"));
    assert_eq!(fs::read(&a1.path)?, b"first");
    assert_eq!(fs::read(&a2.path)?, b"second");
    assert_eq!(fs::read(&a3.path)?, b"first");
    assert_ne!(a1.id, a2.id);
    Ok(())
}

#[tokio::test]
async fn test_create_asset_rejects_path_like_collections() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("a.png");
    fs::write(&source, b"x")?;
    let library = DirectoryLibrary::new(temp_dir.path().join("library"));

    for collection in ["", "..", "../escape", "a/b"] {
        assert!(
            library.create_asset(&source, collection).await.is_err(),
            "{:?} should be rejected",
            collection
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_create_asset_missing_source() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let library = DirectoryLibrary::new(temp_dir.path());

    let result = library
        .create_asset(&temp_dir.path().join("missing.mp4"), "Videos")
        .await;

    assert!(result.is_err());
    // A failed copy leaves no empty asset behind
    assert!(!temp_dir.path().join("Videos").join("missing.mp4").exists());
    Ok(())
}

#[tokio::test]
async fn test_read_only_library_is_denied() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path().join("locked");
    fs::create_dir(&root)?;

    let mut perms = fs::metadata(&root)?.permissions();
    perms.set_readonly(true);
    fs::set_permissions(&root, perms.clone())?;

    let result = DirectoryLibrary::new(&root).request_access().await;

    perms.set_readonly(false);
    fs::set_permissions(&root, perms)?;

    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_collections_per_kind() {
    let collections = Collections::default();

    assert_eq!(collections.for_kind(MediaKind::Image), "Images");
    assert_eq!(collections.for_kind(MediaKind::Video), "Videos");
    assert_eq!(collections.for_kind(MediaKind::Audio), "Audio");
}

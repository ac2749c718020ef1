use dirclip::aggregate::{aggregate_directory, ScanRequest};
use dirclip::errors::DirClipError;
use dirclip::filter::ExtensionFilter;
use std::path::Path;
use tempfile::tempdir;
use tokio::fs;
use tracing_test::traced_test;

fn request(root: &Path, extensions: &[&str]) -> ScanRequest {
    ScanRequest::new(
        root,
        ExtensionFilter::new(Some(extensions.iter().map(|e| e.to_string()).collect())),
    )
}

#[tokio::test]
async fn test_only_matching_extension_is_included() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").await.unwrap();
    fs::write(dir.path().join("b.md"), "world").await.unwrap();

    let result = aggregate_directory(&request(dir.path(), &["txt"]))
        .await
        .unwrap_or_else(|e| panic!("Aggregation failed: {:?}", e));

    assert_eq!(result.combined_text, "--- File: a.txt ---\n\nhello\n\n");
    assert_eq!(result.files_processed, 1);
    assert_eq!(result.total_characters, 5);
}

#[tokio::test]
async fn test_empty_directory_yields_empty_result() {
    let dir = tempdir().unwrap();

    let result = aggregate_directory(&request(dir.path(), &[])).await.unwrap();

    assert_eq!(result.combined_text, "");
    assert_eq!(result.files_processed, 0);
    assert_eq!(result.total_characters, 0);
}

#[tokio::test]
async fn test_nested_file_uses_relative_header() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("sub")).await.unwrap();
    fs::write(dir.path().join("sub").join("c.py"), "print('hi')")
        .await
        .unwrap();

    let result = aggregate_directory(&request(dir.path(), &["py"])).await.unwrap();

    assert!(
        result.combined_text.contains("--- File: sub/c.py ---\n\n"),
        "Unexpected header in: {}",
        result.combined_text
    );
    assert!(!result
        .combined_text
        .contains(&dir.path().to_string_lossy().to_string()));
}

#[tokio::test]
async fn test_empty_filter_includes_every_regular_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Makefile"), "all:").await.unwrap();
    fs::write(dir.path().join(".bashrc"), "alias ll='ls -l'").await.unwrap();
    fs::write(dir.path().join("trailing."), "dot").await.unwrap();
    fs::create_dir_all(dir.path().join("empty_dir")).await.unwrap();

    let result = aggregate_directory(&ScanRequest::new(dir.path(), ExtensionFilter::match_all()))
        .await
        .unwrap();

    assert_eq!(result.files_processed, 3);
    for name in ["Makefile", ".bashrc", "trailing."] {
        assert!(
            result.combined_text.contains(&format!("--- File: {} ---", name)),
            "Missing {}",
            name
        );
    }
}

#[tokio::test]
async fn test_names_without_usable_extension_are_excluded() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Makefile"), "all:").await.unwrap();
    fs::write(dir.path().join(".txt"), "hidden").await.unwrap();
    fs::write(dir.path().join("notes."), "dot").await.unwrap();
    fs::write(dir.path().join("NOTES.TXT"), "upper").await.unwrap();

    let result = aggregate_directory(&request(dir.path(), &["txt"])).await.unwrap();

    assert_eq!(result.files_processed, 1);
    assert_eq!(result.combined_text, "--- File: NOTES.TXT ---\n\nupper\n\n");
}

#[tokio::test]
async fn test_aggregation_is_deterministic() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("b/inner")).await.unwrap();
    fs::create_dir_all(dir.path().join("a")).await.unwrap();
    fs::write(dir.path().join("z.txt"), "last").await.unwrap();
    fs::write(dir.path().join("a/one.txt"), "one").await.unwrap();
    fs::write(dir.path().join("b/inner/two.txt"), "two").await.unwrap();
    fs::write(dir.path().join("b/three.txt"), "three").await.unwrap();

    let first = aggregate_directory(&request(dir.path(), &["txt"])).await.unwrap();
    let second = aggregate_directory(&request(dir.path(), &["txt"])).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.files_processed, 4);
    for name in ["z.txt", "a/one.txt", "b/inner/two.txt", "b/three.txt"] {
        let header = format!("--- File: {} ---", name);
        assert_eq!(
            first.combined_text.matches(&header).count(),
            1,
            "Header for {} should appear exactly once",
            name
        );
    }
}

#[tokio::test]
async fn test_total_characters_counts_chars_not_bytes() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("accents.txt"), "héllo wörld").await.unwrap();
    fs::write(dir.path().join("plain.txt"), "abc").await.unwrap();

    let result = aggregate_directory(&request(dir.path(), &["txt"])).await.unwrap();

    assert_eq!(result.total_characters, 11 + 3);
    assert_eq!(result.files_processed, 2);
}

#[tokio::test]
#[traced_test]
async fn test_unreadable_file_is_skipped_without_aborting() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("bad.txt"), [0xff_u8, 0xfe, 0x00, 0xc3])
        .await
        .unwrap();
    fs::write(dir.path().join("good.txt"), "fine").await.unwrap();

    let result = aggregate_directory(&request(dir.path(), &["txt"])).await.unwrap();

    assert_eq!(result.files_processed, 1);
    assert_eq!(result.total_characters, 4);
    assert!(!result.combined_text.contains("bad.txt"));
    assert!(result.combined_text.contains("--- File: good.txt ---"));
    assert!(logs_contain("Could not read file 'bad.txt'"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_permission_denied_file_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked.txt");
    fs::write(&locked, "secret").await.unwrap();
    fs::write(dir.path().join("open.txt"), "public").await.unwrap();
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can still read the file, nothing to assert then.
    if std::fs::read(&locked).is_ok() {
        return;
    }

    let result = aggregate_directory(&request(dir.path(), &["txt"])).await.unwrap();

    assert_eq!(result.files_processed, 1);
    assert!(result.combined_text.contains("public"));
    assert!(!result.combined_text.contains("secret"));

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o644)).unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlinks_are_not_descended() {
    let dir = tempdir().unwrap();
    let real = dir.path().join("real");
    fs::create_dir_all(&real).await.unwrap();
    fs::write(real.join("x.txt"), "x").await.unwrap();
    std::os::unix::fs::symlink(&real, dir.path().join("link")).unwrap();
    std::os::unix::fs::symlink(dir.path(), real.join("loop")).unwrap();
    std::os::unix::fs::symlink(real.join("x.txt"), dir.path().join("alias.txt")).unwrap();

    let result = aggregate_directory(&request(dir.path(), &["txt"])).await.unwrap();

    assert_eq!(result.files_processed, 2);
    assert!(result.combined_text.contains("--- File: real/x.txt ---"));
    assert!(result.combined_text.contains("--- File: alias.txt ---"));
    assert!(!result.combined_text.contains("link/"));
}

#[tokio::test]
async fn test_missing_root_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let result = aggregate_directory(&request(&missing, &["txt"])).await;

    assert!(
        matches!(result, Err(DirClipError::WalkError(_))),
        "Expected walk error, got {:?}",
        result
    );
}

#[cfg(unix)]
#[tokio::test]
#[traced_test]
async fn test_unreadable_subdirectory_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir_all(&locked).await.unwrap();
    fs::write(locked.join("hidden.txt"), "secret").await.unwrap();
    fs::write(dir.path().join("sibling.txt"), "visible").await.unwrap();
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can still list the directory, nothing to assert then.
    if std::fs::read_dir(&locked).is_ok() {
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = aggregate_directory(&request(dir.path(), &["txt"])).await;
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
    let result = result.unwrap_or_else(|e| panic!("Aggregation failed: {:?}", e));

    assert_eq!(result.files_processed, 1);
    assert_eq!(result.combined_text, "--- File: sibling.txt ---\n\nvisible\n\n");
    assert!(logs_contain("Skipping unreadable entry 'locked'"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_root_fails() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    fs::create_dir_all(&root).await.unwrap();
    fs::write(root.join("a.txt"), "hello").await.unwrap();
    std::fs::set_permissions(&root, std::fs::Permissions::from_mode(0o000)).unwrap();

    if std::fs::read_dir(&root).is_ok() {
        std::fs::set_permissions(&root, std::fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = aggregate_directory(&request(&root, &["txt"])).await;
    std::fs::set_permissions(&root, std::fs::Permissions::from_mode(0o755)).unwrap();

    assert!(
        matches!(result, Err(DirClipError::WalkError(_))),
        "Expected walk error, got {:?}",
        result
    );
}

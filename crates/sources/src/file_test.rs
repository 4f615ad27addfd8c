use super::*;
use std::io::Write;
use tempfile::TempDir;

async fn source_with(contents: &str) -> (TempDir, FileSource) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("telemetry.txt");
    std::fs::write(&path, contents).unwrap();

    let mut source = FileSource::new(&path);
    source.open().await.unwrap();
    (dir, source)
}

#[tokio::test]
async fn test_reads_lines_in_order() {
    let (_dir, mut source) = source_with("45.2\n80.0\n95.0\n").await;
    let mut line = String::new();

    assert!(source.read_line(&mut line).await.unwrap());
    assert_eq!(line, "45.2");
    assert!(source.read_line(&mut line).await.unwrap());
    assert_eq!(line, "80.0");
    assert!(source.read_line(&mut line).await.unwrap());
    assert_eq!(line, "95.0");

    assert_eq!(source.metrics().lines_read, 3);
}

#[tokio::test]
async fn test_eof_returns_false_without_error() {
    let (_dir, mut source) = source_with("1\n").await;
    let mut line = String::new();

    assert!(source.read_line(&mut line).await.unwrap());
    assert!(!source.read_line(&mut line).await.unwrap());
    // Still false on repeated calls
    assert!(!source.read_line(&mut line).await.unwrap());
}

#[tokio::test]
async fn test_picks_up_appended_lines_after_eof() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("telemetry.txt");
    std::fs::write(&path, "1\n").unwrap();

    let mut source = FileSource::new(&path);
    source.open().await.unwrap();

    let mut line = String::new();
    assert!(source.read_line(&mut line).await.unwrap());
    assert!(!source.read_line(&mut line).await.unwrap());

    // Simulate the producer appending while we tail.
    let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
    writeln!(file, "2").unwrap();
    file.flush().unwrap();

    assert!(source.read_line(&mut line).await.unwrap());
    assert_eq!(line, "2");
}

#[tokio::test]
async fn test_open_missing_file_fails_then_recovers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("late.txt");

    let mut source = FileSource::new(&path);
    assert!(source.open().await.is_err());
    assert_eq!(source.metrics().open_failures, 1);

    // File shows up later; the next open succeeds.
    std::fs::write(&path, "7\n").unwrap();
    source.open().await.unwrap();

    let mut line = String::new();
    assert!(source.read_line(&mut line).await.unwrap());
    assert_eq!(line, "7");
}

#[tokio::test]
async fn test_open_is_idempotent() {
    let (_dir, mut source) = source_with("1\n2\n").await;
    let mut line = String::new();

    assert!(source.read_line(&mut line).await.unwrap());
    // A second open must not rewind the reader.
    source.open().await.unwrap();
    assert!(source.read_line(&mut line).await.unwrap());
    assert_eq!(line, "2");
}

#[tokio::test]
async fn test_read_before_open_is_an_error() {
    let mut source = FileSource::new("/tmp/never-opened.txt");
    let mut line = String::new();
    assert!(matches!(
        source.read_line(&mut line).await,
        Err(SourceError::NotOpen)
    ));
}

#[tokio::test]
async fn test_strips_carriage_return() {
    let (_dir, mut source) = source_with("42.5\r\n").await;
    let mut line = String::new();

    assert!(source.read_line(&mut line).await.unwrap());
    assert_eq!(line, "42.5");
}

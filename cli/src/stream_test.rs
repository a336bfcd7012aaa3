use super::*;

const JPEG: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xD9];

fn temp_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("parking-cli-{label}-{}-{}", std::process::id(), now_ms()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    dir
}

// =============================================================================
// frame files
// =============================================================================

#[test]
fn frame_filename_is_zero_padded() {
    assert_eq!(frame_filename(1), "frame-000001.jpg");
    assert_eq!(frame_filename(123_456), "frame-123456.jpg");
}

#[test]
fn frame_sink_numbers_files_from_one() {
    let dir = temp_dir("sink");
    let mut sink = FrameSink::new(dir.clone(), Some(2));
    assert!(!sink.finished());
    sink.on_frame(&JPEG).expect("write 1");
    sink.on_frame(&JPEG).expect("write 2");
    assert_eq!(sink.saved(), 2);
    assert!(sink.finished());
    assert_eq!(std::fs::read(dir.join("frame-000002.jpg")).expect("read"), JPEG);
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn frame_sink_without_limit_never_finishes() {
    let sink = FrameSink::new(PathBuf::from("unused"), None);
    assert!(!sink.finished());
}

#[test]
fn list_jpegs_filters_and_sorts() {
    let dir = temp_dir("list");
    for name in ["b.jpg", "a.JPEG", "notes.txt", "c.png"] {
        std::fs::write(dir.join(name), JPEG).expect("write");
    }
    let names: Vec<String> = list_jpegs(&dir)
        .expect("list")
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_owned))
        .collect();
    assert_eq!(names, vec!["a.JPEG", "b.jpg"]);
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn list_jpegs_missing_dir_is_io_error() {
    let err = list_jpegs(Path::new("/definitely/not/here")).unwrap_err();
    assert!(matches!(err, CliError::Io { .. }));
}

// =============================================================================
// frame source pacing
// =============================================================================

#[test]
fn frame_source_paces_at_fps() {
    let mut source = FrameSource::new(vec![vec![1], vec![2], vec![3]], 10, false);
    assert_eq!(source.poll_outbound(1_000), Some(vec![1]));
    assert_eq!(source.poll_outbound(1_050), None);
    assert_eq!(source.poll_outbound(1_100), Some(vec![2]));
    assert_eq!(source.poll_outbound(1_200), Some(vec![3]));
    assert!(source.finished());
    assert_eq!(source.poll_outbound(1_300), None);
}

#[test]
fn frame_source_loops_when_asked() {
    let mut source = FrameSource::new(vec![vec![1], vec![2]], 10, true);
    assert_eq!(source.poll_outbound(0), Some(vec![1]));
    assert_eq!(source.poll_outbound(100), Some(vec![2]));
    assert_eq!(source.poll_outbound(200), Some(vec![1]));
    assert!(!source.finished());
}

#[test]
fn frame_source_empty_is_finished() {
    let source = FrameSource::new(Vec::new(), 10, false);
    assert!(source.finished());
}

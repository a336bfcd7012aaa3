use super::*;

#[test]
fn snapshot_filename_slugifies_camera_name() {
    assert_eq!(
        snapshot_filename("Entrada Principal", 1_705_314_600_000),
        "capture-entrada-principal-1705314600000.jpg"
    );
}

#[test]
fn snapshot_filename_collapses_punctuation() {
    assert_eq!(snapshot_filename("  Gate #2 -- North! ", 5), "capture-gate-2-north-5.jpg");
}

#[test]
fn snapshot_filename_falls_back_for_empty_names() {
    assert_eq!(snapshot_filename("", 1), "capture-camera-1.jpg");
    assert_eq!(snapshot_filename("Cámara", 1), "capture-c-mara-1.jpg");
}

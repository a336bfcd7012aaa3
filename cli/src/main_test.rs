use clap::CommandFactory;

use super::*;

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn record_query_skips_blank_values() {
    assert!(record_query(None, None).is_empty());
    assert!(record_query(Some("  "), None).is_empty());
}

#[test]
fn record_query_includes_status_and_limit() {
    assert_eq!(
        record_query(Some("activo"), Some(10)),
        vec![("estado", "activo".to_owned()), ("limit", "10".to_owned())]
    );
}

#[test]
fn kind_arg_maps_to_camera_kind() {
    assert_eq!(CameraKind::from(KindArg::Ip), CameraKind::Remote);
    assert_eq!(CameraKind::from(KindArg::Local), CameraKind::Local);
}

#[test]
fn cameras_add_parses_kind_and_url() {
    let cli = Cli::try_parse_from([
        "parking-cli",
        "cameras",
        "add",
        "Entrada",
        "--kind",
        "ip",
        "--url",
        "http://cam/video",
    ])
    .unwrap();
    match cli.command {
        Command::Cameras(CamerasCommand {
            command: CamerasSubcommand::Add { name, kind, url },
        }) => {
            assert_eq!(name, "Entrada");
            assert_eq!(kind, KindArg::Ip);
            assert_eq!(url, "http://cam/video");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn push_loop_flag_parses() {
    let cli = Cli::try_parse_from(["parking-cli", "push", "--dir", "shots", "--fps", "5", "--loop"]).unwrap();
    match cli.command {
        Command::Push(args) => {
            assert_eq!(args.fps, 5);
            assert!(args.looped);
            assert_eq!(args.dir, PathBuf::from("shots"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn server_error_message_names_operation() {
    let err = CliError::ServerError {
        op: "list cameras".to_owned(),
        status: 502,
        message: "null".to_owned(),
    };
    assert_eq!(err.to_string(), "list cameras failed: HTTP 502: null");
}

use super::*;

#[test]
fn default_settings_target_ten_fps() {
    let settings = CaptureSettings::default();
    assert_eq!(settings.fps, 10);
    assert!((settings.frame_interval_ms() - 100.0).abs() < f64::EPSILON);
    assert!((settings.quality - 0.7).abs() < f64::EPSILON);
}

#[test]
fn zero_fps_falls_back_to_default() {
    assert!((frame_interval_ms(0) - 100.0).abs() < f64::EPSILON);
}

#[test]
fn pacer_samples_first_tick_then_waits_an_interval() {
    let mut pacer = CapturePacer::new(10);
    assert!(pacer.should_capture(0.0));
    assert!(!pacer.should_capture(16.0));
    assert!(!pacer.should_capture(99.9));
    assert!(pacer.should_capture(100.0));
    assert!(!pacer.should_capture(150.0));
    assert!(pacer.should_capture(216.0));
}

#[test]
fn pacer_at_sixty_hz_ticks_yields_about_ten_samples_per_second() {
    let mut pacer = CapturePacer::new(10);
    let samples = (0..60)
        .map(|tick| f64::from(tick) * (1000.0 / 60.0))
        .filter(|now| pacer.should_capture(*now))
        .count();
    assert!((9..=10).contains(&samples), "samples = {samples}");
}

#[test]
fn set_fps_changes_interval() {
    let mut pacer = CapturePacer::new(5);
    assert!(pacer.should_capture(0.0));
    assert!(!pacer.should_capture(100.0));
    pacer.set_fps(30);
    assert!(pacer.should_capture(100.0));
}

// =============================================================
// Resolution
// =============================================================

#[test]
fn resolution_parses_presets() {
    assert_eq!("auto".parse::<Resolution>(), Ok(Resolution::Auto));
    assert_eq!(
        "640x360".parse::<Resolution>(),
        Ok(Resolution::Fixed { width: 640, height: 360 })
    );
    assert_eq!(
        " 1280X720 ".parse::<Resolution>(),
        Ok(Resolution::Fixed { width: 1280, height: 720 })
    );
}

#[test]
fn resolution_rejects_garbage() {
    assert!("640".parse::<Resolution>().is_err());
    assert!("0x240".parse::<Resolution>().is_err());
    assert!("wide x tall".parse::<Resolution>().is_err());
}

#[test]
fn resolution_display_matches_parse_input() {
    for preset in Resolution::PRESETS {
        assert_eq!(preset.to_string().parse::<Resolution>(), Ok(preset));
    }
}

#[test]
fn auto_uses_source_size_or_fallback() {
    let settings = CaptureSettings::default();
    assert_eq!(settings.target_size(Some((1920, 1080)), Some("4g")), (1920, 1080));
    assert_eq!(settings.target_size(None, None), FALLBACK_SIZE);
    assert_eq!(settings.target_size(Some((0, 0)), None), FALLBACK_SIZE);
}

#[test]
fn fixed_resolution_wins_on_fast_network() {
    let settings = CaptureSettings {
        resolution: Resolution::Fixed { width: 1280, height: 720 },
        ..CaptureSettings::default()
    };
    assert_eq!(settings.target_size(Some((640, 480)), Some("4g")), (1280, 720));
}

#[test]
fn slow_network_reduces_when_enabled() {
    let settings = CaptureSettings {
        resolution: Resolution::Fixed { width: 1280, height: 720 },
        ..CaptureSettings::default()
    };
    assert_eq!(settings.target_size(None, Some("3g")), REDUCED_SIZE);
    assert_eq!(settings.target_size(None, Some("2g")), REDUCED_SIZE);

    let no_reduce = CaptureSettings {
        auto_reduce: false,
        ..settings
    };
    assert_eq!(no_reduce.target_size(None, Some("2g")), (1280, 720));
}

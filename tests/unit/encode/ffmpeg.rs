use super::*;

#[test]
fn config_validation_catches_bad_values() {
    let ok = match_video_config("out/match.mp4", 800, 750);
    assert!(ok.validate().is_ok());
    assert_eq!(ok.fps, 50);

    assert!(
        EncodeConfig {
            width: 0,
            ..ok.clone()
        }
        .validate()
        .is_err()
    );
    assert!(EncodeConfig { fps: 0, ..ok }.validate().is_err());
}

#[test]
fn odd_dimensions_are_padded_not_rejected() {
    let cfg = match_video_config("out/match.mp4", 801, 751);
    assert!(cfg.validate().is_ok());
    assert!(cfg.needs_padding());
    assert!(!match_video_config("out/match.mp4", 800, 750).needs_padding());
}

#[test]
fn ffmpeg_stream_writes_a_file_when_available() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let dir = std::env::temp_dir().join(format!("spacebattle_ffmpeg_{}", std::process::id()));
    let path = dir.join("clip.mp4");

    let mut stream = FfmpegStream::new(match_video_config(&path, 5, 7)).unwrap();
    let frame = vec![128u8; 5 * 7 * 3];
    for _ in 0..3 {
        stream.write_frame(&frame).unwrap();
    }
    assert!(stream.write_frame(&frame[..10]).is_err());
    stream.finish().unwrap();
    stream.finish().unwrap();
    assert!(stream.write_frame(&frame).is_err());

    assert!(std::fs::metadata(&path).unwrap().len() > 0);
    std::fs::remove_dir_all(&dir).ok();
}

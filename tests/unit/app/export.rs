use super::*;

fn checker(width: u32, height: u32) -> FrameRGBA {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = if (x + y) % 2 == 0 { 255 } else { 0 };
            data.extend_from_slice(&[v, 0, 255 - v, 255]);
        }
    }
    FrameRGBA {
        width,
        height,
        data,
    }
}

#[test]
fn file_name_is_timestamped() {
    assert_eq!(export_file_name(1_700_000_000_123), "driftfield-1700000000123.png");
}

#[test]
fn png_round_trips_losslessly() {
    let dir = tempfile::tempdir().unwrap();
    let frame = checker(5, 3);
    let path = export_png(&frame, &dir.path().join("out"), 42).unwrap();
    assert_eq!(path, dir.path().join("out").join("driftfield-42.png"));

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (5, 3));
    assert_eq!(decoded.into_raw(), frame.data);
}

#[test]
fn same_millisecond_does_not_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let frame = checker(2, 2);
    let a = export_png(&frame, dir.path(), 7).unwrap();
    let b = export_png(&frame, dir.path(), 7).unwrap();
    assert_ne!(a, b);
    assert!(a.exists() && b.exists());
}

#[test]
fn mismatched_buffer_is_an_export_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut frame = checker(2, 2);
    frame.data.pop();
    let err = write_png(&frame, &dir.path().join("bad.png")).unwrap_err();
    assert!(matches!(err, DriftError::Export(_)));
}

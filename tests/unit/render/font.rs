use super::*;

#[test]
fn font_bytes_expose_their_family() {
    let font = fixture();
    assert_eq!(font.family(), "DejaVu Sans");
    assert!(format!("{font:?}").contains("DejaVu Sans"));
}

#[test]
fn non_font_bytes_are_rejected() {
    let err = LabelFont::from_bytes(b"definitely not a font".to_vec()).unwrap_err();
    assert!(matches!(err, SpacebattleError::Validation(_)), "{err}");
}

#[test]
fn shaping_positions_glyphs_along_the_baseline() {
    let mut engine = TextEngine::new(fixture());
    let shaped = engine.shape("AB", 30.0).unwrap();

    assert_eq!(shaped.glyphs.len(), 2);
    assert_eq!(shaped.font_size, 30.0);
    assert!(shaped.glyphs[0].x < shaped.glyphs[1].x);
    assert!(shaped.glyphs.iter().all(|g| g.y.abs() < 0.01));
    assert!(shaped.advance > shaped.glyphs[1].x as f64);
    assert!(shaped.ascent > 20.0 && shaped.ascent < 30.0, "{}", shaped.ascent);
    assert!(shaped.descent > 0.0);
}

#[test]
fn advance_scales_with_size_and_length() {
    let mut engine = TextEngine::new(fixture());
    let small = engine.shape("Bob", 30.0).unwrap().advance;
    let large = engine.shape("Bob", 60.0).unwrap().advance;
    let longer = engine.shape("Bobby", 30.0).unwrap().advance;

    assert!((large - 2.0 * small).abs() < 1.0, "{small} vs {large}");
    assert!(longer > small);
    assert_eq!(engine.shape("", 30.0).unwrap().advance, 0.0);
}

#[test]
fn bad_size_is_rejected() {
    let mut engine = TextEngine::new(fixture());
    assert!(engine.shape("a", 0.0).is_err());
    assert!(engine.shape("a", f32::NAN).is_err());
}

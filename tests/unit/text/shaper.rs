use super::*;

fn engine() -> TextLayoutEngine {
    TextLayoutEngine::new(&LoadedFont::builtin().unwrap()).unwrap()
}

#[test]
fn advance_grows_with_text_and_size() {
    let mut e = engine();
    let short = e.advance("Hi", 40.0).unwrap();
    let long = e.advance("Hi there", 40.0).unwrap();
    let big = e.advance("Hi", 80.0).unwrap();
    assert!(short > 0.0);
    assert!(long > short);
    assert!(big > short * 1.5);
}

#[test]
fn empty_text_has_zero_advance() {
    assert_eq!(engine().advance("", 60.0).unwrap(), 0.0);
}

#[test]
fn measurement_is_deterministic() {
    let mut a = engine();
    let mut b = engine();
    let text = "Deterministic shaping across engines";
    assert_eq!(a.advance(text, 72.0).unwrap(), b.advance(text, 72.0).unwrap());
    assert_eq!(
        a.vertical_metrics(72.0).unwrap(),
        b.vertical_metrics(72.0).unwrap()
    );
}

#[test]
fn vertical_metrics_scale_with_size() {
    let mut e = engine();
    let small = e.vertical_metrics(30.0).unwrap();
    let large = e.vertical_metrics(60.0).unwrap();
    assert!(small.ascent > 0.0 && small.descent > 0.0);
    assert!(large.ascent > small.ascent);
    assert!(large.ascent + large.descent < 60.0 * 1.5);
}

#[test]
fn invalid_size_is_rejected() {
    let mut e = engine();
    assert!(e.layout_line("x", 0.0, TextBrushRgba8::default()).is_err());
    assert!(e.layout_line("x", f32::NAN, TextBrushRgba8::default()).is_err());
}

#[test]
fn shaping_uses_the_loaded_face() {
    let font = LoadedFont::builtin().unwrap();
    let mut e = TextLayoutEngine::new(&font).unwrap();
    assert_eq!(e.face.weight, parley::style::FontWeight::BOLD);

    let layout = e
        .layout_line("Face check", 48.0, TextBrushRgba8::default())
        .unwrap();
    let mut runs = 0;
    for line in layout.lines() {
        for item in line.items() {
            if let parley::PositionedLayoutItem::GlyphRun(run) = item {
                assert_eq!(run.run().font().index, font.index());
                runs += 1;
            }
        }
    }
    assert!(runs > 0);
}

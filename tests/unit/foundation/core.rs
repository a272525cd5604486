use super::*;

#[test]
fn pixel_size_scales_by_ratio() {
    let px = PixelSize::from_layout(LayoutSize::new(320.0, 200.0), 2.0);
    assert_eq!(
        px,
        PixelSize {
            width: 640,
            height: 400
        }
    );
    assert_eq!(px.area(), 640 * 400);
}

#[test]
fn pixel_size_rejects_degenerate_layouts() {
    assert!(PixelSize::from_layout(LayoutSize::new(0.0, 200.0), 1.0).is_empty());
    assert!(PixelSize::from_layout(LayoutSize::new(f64::NAN, 200.0), 1.0).is_empty());
    assert!(PixelSize::from_layout(LayoutSize::new(-5.0, 200.0), 1.0).is_empty());

    // A broken ratio falls back to 1x rather than zeroing the surface.
    let px = PixelSize::from_layout(LayoutSize::new(10.0, 20.0), f64::NAN);
    assert_eq!(
        px,
        PixelSize {
            width: 10,
            height: 20
        }
    );
}

#[test]
fn premul_matches_straight_for_opaque() {
    let c = Rgba8::opaque(12, 200, 255);
    assert_eq!(c.to_premul(), [12, 200, 255, 255]);
    assert_eq!(Rgba8::opaque(255, 255, 255).with_alpha(0.0).to_premul(), [0, 0, 0, 0]);
}

#[test]
fn hex_is_lowercase_rrggbb() {
    assert_eq!(Rgba8::opaque(255, 0, 171).to_hex(), "#ff00ab");
}

use super::*;

fn red() -> Rgba8 {
    Rgba8::rgb(255, 0, 0)
}

#[test]
fn background_fills_every_pixel() {
    let mut s = CpuSurface::new(8, 4, Some(Rgba8::rgb(0, 0, 0))).unwrap();
    let frame = s.finish().unwrap();
    assert_eq!(frame.data.len(), 8 * 4 * 4);
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn transparent_without_background() {
    let mut s = CpuSurface::new(4, 4, None).unwrap();
    let frame = s.finish().unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn marker_paints_its_center_only() {
    let mut s = CpuSurface::new(32, 32, None).unwrap();
    s.marker(Point::new(16.0, 16.0), 6.0, red(), None);
    let frame = s.finish().unwrap();
    assert_eq!(frame.pixel(16, 16), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(1, 1).map(|p| p[3]), Some(0));
}

#[test]
fn polyline_follows_transform() {
    let mut s = CpuSurface::new(40, 40, None).unwrap();
    s.set_transform(Affine::scale(2.0));
    s.polyline(&[Point::new(2.0, 10.0), Point::new(18.0, 10.0)], red(), 2.0);
    let frame = s.finish().unwrap();
    assert_eq!(frame.pixel(20, 20).map(|p| p[3]), Some(255));
    assert_eq!(frame.pixel(20, 5).map(|p| p[3]), Some(0));
}

#[test]
fn opacity_layer_scales_alpha() {
    let mut s = CpuSurface::new(16, 16, None).unwrap();
    s.push_opacity(0.5);
    s.fill_rect(Rect::new(0.0, 0.0, 16.0, 16.0), red());
    s.pop_opacity();
    let frame = s.finish().unwrap();
    let a = frame.pixel(8, 8).map(|p| p[3]).unwrap_or(0);
    assert!((120..=135).contains(&a), "alpha {a}");
}

#[test]
fn finish_resets_for_next_frame() {
    let mut s = CpuSurface::new(16, 16, None).unwrap();
    s.push_opacity(0.5);
    s.fill_rect(Rect::new(0.0, 0.0, 16.0, 16.0), red());
    // Unbalanced layer is closed by finish.
    assert!(s.finish().is_ok());
    let next = s.finish().unwrap();
    assert!(next.data.iter().all(|&b| b == 0));
}

#[test]
fn stray_pop_is_ignored() {
    let mut s = CpuSurface::new(4, 4, None).unwrap();
    s.pop_opacity();
    assert!(s.finish().is_ok());
}

#[test]
fn clip_layer_confines_fills() {
    let mut s = CpuSurface::new(32, 32, None).unwrap();
    s.set_transform(Affine::translate((8.0, 8.0)));
    s.push_clip(Rect::new(0.0, 0.0, 8.0, 8.0));
    s.marker(Point::new(0.0, 0.0), 12.0, red(), None);
    s.pop_clip();
    let frame = s.finish().unwrap();
    assert_eq!(frame.pixel(12, 12), Some([255, 0, 0, 255]));
    // Inside the marker but outside the clip.
    assert_eq!(frame.pixel(4, 4).map(|p| p[3]), Some(0));
    assert_eq!(frame.pixel(18, 10).map(|p| p[3]), Some(0));
}

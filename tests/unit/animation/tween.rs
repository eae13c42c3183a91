use super::*;

#[test]
fn value_tracks_time_window() {
    let tw = Tween::new(Millis(1000), Millis(300), Ease::Linear);
    assert_eq!(tw.value(Millis(0)), 0.0);
    assert_eq!(tw.value(Millis(1150)), 0.5);
    assert_eq!(tw.value(Millis(1300)), 1.0);
    assert_eq!(tw.value(Millis(5000)), 1.0);
    assert!(!tw.is_done(Millis(1299)));
    assert!(tw.is_done(Millis(1300)));
}

#[test]
fn fade_out_is_monotonic_and_reaches_zero() {
    let tw = Tween::new(Millis(0), Millis(8000), Ease::EaseOut);
    let mut prev = tw.fade_out(Millis(0));
    assert_eq!(prev, 1.0);
    for t in (0..=8000).step_by(250) {
        let o = tw.fade_out(Millis(t));
        assert!(o <= prev + 1e-12);
        prev = o;
    }
    assert_eq!(tw.fade_out(Millis(8000)), 0.0);
}

#[test]
fn zero_duration_completes_immediately() {
    let tw = Tween::new(Millis(10), Millis::ZERO, Ease::EaseOut);
    assert_eq!(tw.value(Millis(10)), 1.0);
    assert!(tw.is_done(Millis(10)));
}

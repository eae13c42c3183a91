use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn samples_stay_in_unit_interval() {
    let mut rng = Rng64::new(7);
    for _ in 0..1000 {
        let v = rng.next_f64();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn index_never_reaches_len() {
    let mut src = ScriptedSource::constant(0.999_999);
    assert_eq!(src.index(4), 3);
    let mut src = ScriptedSource::constant(0.0);
    assert_eq!(src.index(4), 0);
}

#[test]
fn scripted_source_cycles_and_counts() {
    let mut src = ScriptedSource::new([0.1, 0.9]);
    assert_eq!(src.next_f64(), 0.1);
    assert_eq!(src.next_f64(), 0.9);
    assert_eq!(src.next_f64(), 0.1);
    assert_eq!(src.draws(), 3);
    assert!(src.chance(0.95));
    assert!(!src.chance(0.1));
}

#[test]
fn range_maps_linearly() {
    let mut src = ScriptedSource::constant(0.5);
    assert_eq!(src.range(24.0, 80.0), 52.0);
}

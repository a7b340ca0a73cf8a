use super::*;

#[test]
fn same_seed_same_stream() {
    let mut a = Rng64::new(42);
    let mut b = Rng64::new(42);
    for _ in 0..16 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn derived_streams_differ_per_index() {
    let mut a = Rng64::derive(7, 0);
    let mut b = Rng64::derive(7, 1);
    assert_ne!(a.next_u64(), b.next_u64());
}

#[test]
fn unit_interval_and_ranges_stay_in_bounds() {
    let mut rng = Rng64::new(3);
    for _ in 0..1000 {
        let v = rng.next_f64_01();
        assert!((0.0..1.0).contains(&v));
        let r = rng.range(-2.0, 5.0);
        assert!((-2.0..5.0).contains(&r));
        assert!(rng.below(7) < 7);
    }
}

#[test]
fn shuffle_is_a_permutation() {
    let mut rng = Rng64::new(99);
    let mut v: Vec<usize> = (0..20).collect();
    rng.shuffle(&mut v);
    let mut sorted = v.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..20).collect::<Vec<_>>());
}

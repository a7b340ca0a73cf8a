use super::*;

fn seq(count: usize, order: RevealOrder, bias: CenterBias) -> Vec<usize> {
    reveal_sequence(count, order, bias, &mut Rng64::new(1))
}

#[test]
fn center_radiates_right_then_left() {
    assert_eq!(
        seq(5, RevealOrder::Center, CenterBias::RightFirst),
        vec![2, 3, 1, 4, 0]
    );
    assert_eq!(
        seq(5, RevealOrder::Center, CenterBias::LeftFirst),
        vec![2, 1, 3, 0, 4]
    );
}

#[test]
fn center_handles_even_and_tiny_counts() {
    assert_eq!(
        seq(4, RevealOrder::Center, CenterBias::RightFirst),
        vec![2, 3, 1, 0]
    );
    assert_eq!(seq(1, RevealOrder::Center, CenterBias::RightFirst), vec![0]);
    assert!(seq(0, RevealOrder::Center, CenterBias::RightFirst).is_empty());
}

#[test]
fn ltr_and_rtl_indices() {
    let mut rng = Rng64::new(0);
    assert_eq!(
        order_indices(4, RevealOrder::Ltr, CenterBias::RightFirst, &mut rng),
        vec![0, 1, 2, 3]
    );
    assert_eq!(
        order_indices(4, RevealOrder::Rtl, CenterBias::RightFirst, &mut rng),
        vec![3, 2, 1, 0]
    );
}

#[test]
fn center_order_indices_invert_the_sequence() {
    let idx = order_indices(
        5,
        RevealOrder::Center,
        CenterBias::RightFirst,
        &mut Rng64::new(0),
    );
    assert_eq!(idx, vec![4, 2, 0, 1, 3]);
}

#[test]
fn random_is_a_seeded_permutation() {
    let a = seq(12, RevealOrder::Random, CenterBias::RightFirst);
    let b = seq(12, RevealOrder::Random, CenterBias::RightFirst);
    assert_eq!(a, b);
    let mut sorted = a.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..12).collect::<Vec<_>>());
}

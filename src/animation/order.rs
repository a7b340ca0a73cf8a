//! Reveal orders for staggered text units.

use crate::foundation::rng::Rng64;

/// Order in which units of a text start their reveal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealOrder {
    #[default]
    Ltr,
    Rtl,
    Center,
    Random,
}

/// First side visited after the midpoint in [`RevealOrder::Center`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterBias {
    #[default]
    RightFirst,
    LeftFirst,
}

/// Positions `0..count` listed in the order they start revealing.
///
/// `Center` starts at `count / 2` and alternates outward; for five units with
/// [`CenterBias::RightFirst`] that is `2, 3, 1, 4, 0`.
pub fn reveal_sequence(
    count: usize,
    order: RevealOrder,
    bias: CenterBias,
    rng: &mut Rng64,
) -> Vec<usize> {
    match order {
        RevealOrder::Ltr => (0..count).collect(),
        RevealOrder::Rtl => (0..count).rev().collect(),
        RevealOrder::Center => {
            let mut out = Vec::with_capacity(count);
            if count == 0 {
                return out;
            }
            let mid = count / 2;
            out.push(mid);
            let mut step = 1usize;
            while out.len() < count {
                let right = mid.checked_add(step).filter(|&p| p < count);
                let left = mid.checked_sub(step);
                let (first, second) = match bias {
                    CenterBias::RightFirst => (right, left),
                    CenterBias::LeftFirst => (left, right),
                };
                out.extend(first);
                out.extend(second);
                step += 1;
            }
            out
        }
        RevealOrder::Random => {
            let mut out: Vec<usize> = (0..count).collect();
            rng.shuffle(&mut out);
            out
        }
    }
}

/// Inverse of [`reveal_sequence`]: `result[position]` is that position's order index.
pub fn order_indices(
    count: usize,
    order: RevealOrder,
    bias: CenterBias,
    rng: &mut Rng64,
) -> Vec<usize> {
    let seq = reveal_sequence(count, order, bias, rng);
    let mut out = vec![0usize; count];
    for (order_index, &pos) in seq.iter().enumerate() {
        out[pos] = order_index;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/animation/order.rs"]
mod tests;

use crate::*;

/// Sum non-negative terms smallest-first.
///
/// Ascending order bounds the relative rounding error better than an
/// arbitrary order does. The terms are copied and sorted when a buffer can
/// be reserved; otherwise [`frugal`] produces the same sum without one.
pub fn ascending(terms: &[Probability]) -> Probability {
    let mut sorted = Vec::new();
    match sorted.try_reserve_exact(terms.len()) {
        Ok(()) => {
            sorted.extend_from_slice(terms);
            sorted.sort_by(Probability::total_cmp);
            sorted.iter().sum()
        }
        Err(_) => {
            log::warn!("summing {} terms without a sort buffer", terms.len());
            frugal(terms)
        }
    }
}

/// Allocation-free ascending summation in O(n²).
///
/// Repeatedly scans for the smallest term above the last one consumed and
/// adds every occurrence of it.
pub fn frugal(terms: &[Probability]) -> Probability {
    let mut total = 0.;
    let mut floor = Probability::NEG_INFINITY;
    while let Some(next) = terms
        .iter()
        .copied()
        .filter(|&x| x > floor)
        .min_by(Probability::total_cmp)
    {
        total += terms.iter().filter(|&&x| x == next).map(|_| next).sum::<Probability>();
        floor = next;
    }
    total
}

use smallvec::SmallVec;

/// Divisor list; almost every tick-planning count has fewer than 16 divisors.
pub type Factors = SmallVec<[usize; 16]>;

/// Returns every positive divisor of `n` in ascending order.
///
/// `0` has no meaningful divisor list for tick planning and yields an empty
/// sequence.
#[must_use]
pub fn factors(n: usize) -> Factors {
    let mut low = Factors::new();
    let mut high = Factors::new();
    if n == 0 {
        return low;
    }

    let mut candidate = 1;
    while candidate <= n / candidate {
        if n % candidate == 0 {
            low.push(candidate);
            let pair = n / candidate;
            if pair != candidate {
                high.push(pair);
            }
        }
        candidate += 1;
    }

    // `high` was filled in descending order.
    low.extend(high.into_iter().rev());
    low
}

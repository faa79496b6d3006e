/// A stored integer. Carries no identity beyond its value.
pub type Number = i64;

/// Sort a collection of numbers into ascending order.
///
/// Equal values are indistinguishable, so an unstable sort still yields the
/// one correct output for any input.
pub fn sort_ascending(mut numbers: Vec<Number>) -> Vec<Number> {
    if numbers.len() < 2 {
        return numbers;
    }
    numbers.sort_unstable();
    numbers
}

/// Returns true when every adjacent pair is non-decreasing.
pub fn is_ascending(numbers: &[Number]) -> bool {
    numbers.windows(2).all(|pair| pair[0] <= pair[1])
}

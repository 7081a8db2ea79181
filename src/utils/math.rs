// src/utils/math.rs
use std::ops::Mul;

/// Returns `x * x`.
pub fn square<T>(x: T) -> T
where
    T: Mul<Output = T> + Copy,
{
    x * x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squares_integers_and_floats() {
        assert_eq!(square(3), 9);
        assert_eq!(square(-4i64), 16);
        assert_eq!(square(0u8), 0);
        assert_eq!(square(-1.5f64), 2.25);
    }
}

//! Grid helpers shared by sampling and analysis.

/// Evenly spaced values over [start, end], endpoints included.
pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    if num_values == 1 {
        return vec![start];
    }
    let mut values = Vec::with_capacity(num_values);
    let step = (end - start) / (num_values as f64 - 1.0);
    for i in 0..num_values {
        values.push(start + i as f64 * step);
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_endpoints_and_spacing() {
        let grid = linspace(-5.0, 5.0, 11);
        assert_eq!(grid.len(), 11);
        assert_relative_eq!(grid[0], -5.0);
        assert_relative_eq!(grid[10], 5.0);
        assert_relative_eq!(grid[6] - grid[5], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_linspace_single_point() {
        assert_eq!(linspace(2.0, 7.0, 1), vec![2.0]);
    }
}

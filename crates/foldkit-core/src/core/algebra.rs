use std::fmt;

/// Outcome of solving `a·x + b = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinearSolution {
    Unique(f64),
    Infinite,
    NoSolution,
}

pub fn solve_linear(a: f64, b: f64) -> LinearSolution {
    if a == 0.0 {
        if b == 0.0 {
            LinearSolution::Infinite
        } else {
            LinearSolution::NoSolution
        }
    } else {
        LinearSolution::Unique(-b / a)
    }
}

impl fmt::Display for LinearSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinearSolution::Unique(x) => write!(f, "x = {:.4}", x),
            LinearSolution::Infinite => f.write_str("infinitely many solutions"),
            LinearSolution::NoSolution => f.write_str("no solution"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonzero_slope_has_unique_solution() {
        assert_eq!(solve_linear(2.0, 4.0), LinearSolution::Unique(-2.0));
        assert_eq!(solve_linear(2.0, 4.0).to_string(), "x = -2.0000");
    }

    #[test]
    fn zero_slope_and_zero_intercept_is_infinite() {
        assert_eq!(solve_linear(0.0, 0.0), LinearSolution::Infinite);
    }

    #[test]
    fn zero_slope_with_intercept_has_no_solution() {
        assert_eq!(solve_linear(0.0, 3.0), LinearSolution::NoSolution);
        assert_eq!(solve_linear(0.0, 3.0).to_string(), "no solution");
    }
}

use std::fmt;

/// Average points per turn, kept as an exact ratio.
///
/// Rounding only happens at formatting boundaries: two decimals, half away
/// from zero, computed in integer arithmetic so `10/3` is always `3.33`
/// and `5/8` is always `0.63`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Moyenne {
    pub total: u64,
    pub turns: u64,
}

impl Moyenne {
    pub fn new(total: u64, turns: u64) -> Self {
        Self { total, turns }
    }

    /// Unrounded value. Zero turns yields 0.
    pub fn value(&self) -> f64 {
        if self.turns == 0 {
            return 0.0;
        }
        self.total as f64 / self.turns as f64
    }

    /// The value in hundredths, rounded half away from zero.
    pub fn hundredths(&self) -> u128 {
        if self.turns == 0 {
            return 0;
        }
        let total = u128::from(self.total);
        let turns = u128::from(self.turns);
        (total * 200 + turns) / (turns * 2)
    }

    /// The value rounded to two decimals, as stored in session summaries.
    pub fn rounded(&self) -> f64 {
        self.hundredths() as f64 / 100.0
    }
}

impl fmt::Display for Moyenne {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.hundredths();
        write!(f, "{}.{:02}", h / 100, h % 100)
    }
}

/// Display rounding for figures that are already at or near two decimals.
/// Floating point, so a tie such as `1.005` may land on either side; exact
/// rounding goes through [`Moyenne::hundredths`].
fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a stored moyenne with two decimals.
pub fn format_two(value: f64) -> String {
    format!("{:.2}", round_two(value))
}

use std::fmt;

/// A single comparison applied to a raw input value.
///
/// Comparisons follow IEEE semantics, so a NaN input never matches and
/// falls through to the ladder's final rung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    Below(f64),
    Above(f64),
    AtMost(f64),
    Equal(f64),
    /// Matches values below the first bound or above the second.
    Outside(f64, f64),
}

impl Threshold {
    #[allow(clippy::float_cmp)]
    pub fn matches(self, value: f64) -> bool {
        match self {
            Self::Below(t) => value < t,
            Self::Above(t) => value > t,
            Self::AtMost(t) => value <= t,
            Self::Equal(t) => value == t,
            Self::Outside(lo, hi) => value < lo || value > hi,
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Below(t) => write!(f, "<{t}"),
            Self::Above(t) => write!(f, ">{t}"),
            Self::AtMost(t) => write!(f, "<={t}"),
            Self::Equal(t) => write!(f, "={t}"),
            Self::Outside(lo, hi) => write!(f, "<{lo} or >{hi}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rung {
    pub when: Threshold,
    pub points: u8,
}

/// Ordered rungs, highest risk first. The first matching rung decides the
/// contribution; `otherwise` applies when none match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ladder {
    rungs: &'static [Rung],
    otherwise: u8,
}

impl Ladder {
    pub const fn new(rungs: &'static [Rung], otherwise: u8) -> Self {
        Self { rungs, otherwise }
    }

    pub fn points(&self, value: f64) -> u8 {
        self.rungs
            .iter()
            .find(|rung| rung.when.matches(value))
            .map_or(self.otherwise, |rung| rung.points)
    }

    pub fn max_points(&self) -> u8 {
        self.rungs
            .iter()
            .map(|rung| rung.points)
            .fold(self.otherwise, u8::max)
    }

    pub fn describe(&self) -> String {
        let mut parts = self
            .rungs
            .iter()
            .map(|rung| format!("{} if {}", rung.points, rung.when))
            .collect::<Vec<_>>();
        parts.push(format!("otherwise {}", self.otherwise));
        parts.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SAMPLE: Ladder = Ladder::new(
        &[
            Rung {
                when: Threshold::Above(0.7),
                points: 25,
            },
            Rung {
                when: Threshold::Above(0.5),
                points: 20,
            },
        ],
        0,
    );

    #[test]
    fn first_matching_rung_wins() {
        assert_eq!(SAMPLE.points(0.9), 25);
        assert_eq!(SAMPLE.points(0.6), 20);
        assert_eq!(SAMPLE.points(0.5), 0);
    }

    #[test]
    fn nan_falls_through_to_otherwise() {
        let ladder = Ladder::new(
            &[Rung {
                when: Threshold::Equal(0.0),
                points: 0,
            }],
            35,
        );
        assert_eq!(ladder.points(f64::NAN), 35);
        assert_eq!(ladder.max_points(), 35);
    }

    #[test]
    fn outside_matches_both_tails() {
        let t = Threshold::Outside(25.0, 60.0);
        assert!(t.matches(24.9));
        assert!(t.matches(60.5));
        assert!(!t.matches(25.0));
        assert!(!t.matches(60.0));
    }

    #[test]
    fn describe_lists_rungs_in_order() {
        assert_eq!(SAMPLE.describe(), "25 if >0.7; 20 if >0.5; otherwise 0");
    }
}

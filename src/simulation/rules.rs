use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Number of distinct neighbor counts (0..=8).
pub const NEIGHBOR_COUNTS: usize = 9;

/// Birth/survival rule in `B.../S...` notation.
///
/// Both sets only ever hold counts in 1..=8. Digits 0 and 9 are accepted by
/// the parser but dropped, since a cell can't be born from nothing and can
/// never have nine neighbors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub born: BTreeSet<u8>,
    pub survive: BTreeSet<u8>,
}

impl Rule {
    /// Conway's Game of Life (B3/S23).
    pub fn conway() -> Self {
        Self {
            born: BTreeSet::from([3]),
            survive: BTreeSet::from([2, 3]),
        }
    }

    /// Parse `b<digits>/s<digits>`, case-insensitive. The slash is optional.
    pub fn parse(descriptor: &str) -> Result<Self, ConfigError> {
        let bad = || ConfigError::BadRule(descriptor.to_string());

        let lower = descriptor.to_ascii_lowercase();
        let rest = lower.strip_prefix('b').ok_or_else(bad)?;
        let s_pos = rest.find('s').ok_or_else(bad)?;
        let born_digits = &rest[..s_pos];
        let born_digits = born_digits.strip_suffix('/').unwrap_or(born_digits);
        let survive_digits = &rest[s_pos + 1..];

        Ok(Self {
            born: parse_counts(born_digits).ok_or_else(bad)?,
            survive: parse_counts(survive_digits).ok_or_else(bad)?,
        })
    }

    pub fn is_conway(&self) -> bool {
        *self == Self::conway()
    }
}

/// Digits to a set of possible neighbor counts; `None` on any non-digit.
fn parse_counts(digits: &str) -> Option<BTreeSet<u8>> {
    let mut counts = BTreeSet::new();
    for ch in digits.chars() {
        let n = ch.to_digit(10)? as u8;
        if (1..=8).contains(&n) {
            counts.insert(n);
        }
    }
    Some(counts)
}

impl Default for Rule {
    fn default() -> Self {
        Self::conway()
    }
}

impl FromStr for Rule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for n in &self.born {
            write!(f, "{n}")?;
        }
        write!(f, "/S")?;
        for n in &self.survive {
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

/// Compiled form of a [`Rule`], used by the engine on every cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleSet {
    /// B3/S23 in closed form.
    Conway,
    /// Indexed by `[alive as usize][neighbor_count]`.
    Table([[u8; NEIGHBOR_COUNTS]; 2]),
}

impl RuleSet {
    pub fn new(rule: &Rule) -> Self {
        if rule.is_conway() {
            return RuleSet::Conway;
        }

        let table = Self::build_table(rule);
        log::info!(
            "Rules: Born: {:?}, Survive: {:?}",
            table[0],
            table[1]
        );
        RuleSet::Table(table)
    }

    /// Lookup-table encoding of any rule, including B3/S23.
    pub fn build_table(rule: &Rule) -> [[u8; NEIGHBOR_COUNTS]; 2] {
        let mut table = [[0u8; NEIGHBOR_COUNTS]; 2];
        for &b in &rule.born {
            table[0][b as usize] = 1;
        }
        for &s in &rule.survive {
            table[1][s as usize] = 1;
        }
        table
    }

    /// Next state (0 or 1) of a cell with `count` live neighbors.
    #[inline]
    pub fn apply(&self, alive: bool, count: u8) -> u8 {
        match self {
            RuleSet::Conway => (count == 3 || (alive && count == 2)) as u8,
            RuleSet::Table(table) => table[alive as usize][count as usize],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        let lower = Rule::parse("b3/s23").unwrap();
        let upper = Rule::parse("B3/S23").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.born, BTreeSet::from([3]));
        assert_eq!(lower.survive, BTreeSet::from([2, 3]));
        assert!(lower.is_conway());
    }

    #[test]
    fn test_parse_empty_sets() {
        let rule = Rule::parse("b/s").unwrap();
        assert!(rule.born.is_empty());
        assert!(rule.survive.is_empty());
    }

    #[test]
    fn test_parse_without_slash() {
        assert_eq!(Rule::parse("B36S23").unwrap().to_string(), "B36/S23");
    }

    #[test]
    fn test_parse_drops_impossible_counts() {
        let rule = Rule::parse("b039/s0129").unwrap();
        assert_eq!(rule.born, BTreeSet::from([3]));
        assert_eq!(rule.survive, BTreeSet::from([1, 2]));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["b3", "s23", "", "3/23", "b3/s2x", "b3//s23", "x3/s23", "b3/s23 "] {
            assert_eq!(
                Rule::parse(bad),
                Err(ConfigError::BadRule(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_roundtrip() {
        let rule = Rule::parse("b3678/s34678").unwrap();
        assert_eq!(rule.to_string(), "B3678/S34678");
        assert_eq!(rule.to_string().parse::<Rule>().unwrap(), rule);
    }

    #[test]
    fn test_conway_dispatches_to_fast_path() {
        assert_eq!(RuleSet::new(&Rule::conway()), RuleSet::Conway);
        assert!(matches!(
            RuleSet::new(&Rule::parse("b36/s23").unwrap()),
            RuleSet::Table(_)
        ));
    }

    #[test]
    fn test_fast_path_matches_table() {
        let table = RuleSet::Table(RuleSet::build_table(&Rule::conway()));
        for alive in [false, true] {
            for count in 0..NEIGHBOR_COUNTS as u8 {
                assert_eq!(
                    RuleSet::Conway.apply(alive, count),
                    table.apply(alive, count),
                    "alive={alive} count={count}"
                );
            }
        }
    }

    #[test]
    fn test_table_layout() {
        let table = RuleSet::build_table(&Rule::parse("b1/s8").unwrap());
        assert_eq!(table[0], [0, 1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(table[1], [0, 0, 0, 0, 0, 0, 0, 0, 1]);
    }
}

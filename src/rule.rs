// rule.rs - Outer-totalistic birth/survival rules (B3/S23 and friends)

use std::fmt;
use std::str::FromStr;

use crate::error::LifeError;

/// Which neighbor counts give birth to a dead cell and which keep a live cell alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule {
    birth: [bool; 9],
    survival: [bool; 9],
}

const fn mask(counts: &[u8]) -> [bool; 9] {
    let mut table = [false; 9];
    let mut i = 0;
    while i < counts.len() {
        table[counts[i] as usize] = true;
        i += 1;
    }
    table
}

impl Rule {
    /// Conway's Game of Life.
    pub const CONWAY: Rule = Rule { birth: mask(&[3]), survival: mask(&[2, 3]) };
    pub const HIGHLIFE: Rule = Rule { birth: mask(&[3, 6]), survival: mask(&[2, 3]) };
    pub const SEEDS: Rule = Rule { birth: mask(&[2]), survival: mask(&[]) };
    pub const DAY_AND_NIGHT: Rule = Rule {
        birth: mask(&[3, 6, 7, 8]),
        survival: mask(&[3, 4, 6, 7, 8]),
    };

    /// Counts above 8 are rejected.
    pub fn new(birth: &[u8], survival: &[u8]) -> Result<Self, LifeError> {
        if let Some(bad) = birth.iter().chain(survival).find(|&&n| n > 8) {
            return Err(LifeError::InvalidRule(format!("neighbor count {bad} exceeds 8")));
        }
        Ok(Self { birth: mask(birth), survival: mask(survival) })
    }

    pub fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        let n = neighbors as usize;
        if alive { self.survival[n] } else { self.birth[n] }
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::CONWAY
    }
}

fn digits(table: &[bool; 9]) -> String {
    (0..9).filter(|&n| table[n]).map(|n| char::from(b'0' + n as u8)).collect()
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}/S{}", digits(&self.birth), digits(&self.survival))
    }
}

impl FromStr for Rule {
    type Err = LifeError;

    /// Parses `B3/S23` notation; the halves may come in either order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LifeError::InvalidRule(s.to_string());
        let (first, second) = s.trim().split_once('/').ok_or_else(invalid)?;

        let mut birth = None;
        let mut survival = None;
        for part in [first, second] {
            let mut chars = part.trim().chars();
            let slot = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survival,
                _ => return Err(invalid()),
            };
            let counts = chars
                .map(|c| c.to_digit(10).filter(|&d| d <= 8).map(|d| d as u8))
                .collect::<Option<Vec<u8>>>()
                .ok_or_else(invalid)?;
            if slot.replace(counts).is_some() {
                return Err(invalid());
            }
        }

        match (birth, survival) {
            (Some(birth), Some(survival)) => Rule::new(&birth, &survival),
            _ => Err(invalid()),
        }
    }
}

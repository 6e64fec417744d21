//! The closed catalogue of physical units the literal grammar can accept.

/// A physical unit the number grammar may be required to accept after the
/// SI suffix position. The catalogue is closed; grammar code matches on it
/// exhaustively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    /// Frequency in hertz. Accepts `Hz` and the technically invalid `hz`.
    Hertz,
    /// Time in seconds. Accepts `s`.
    Second,
}

impl Unit {
    /// Accepted literal spellings for this unit.
    pub fn spellings(self) -> &'static [&'static str] {
        match self {
            Unit::Hertz => &["Hz", "hz"],
            Unit::Second => &["s"],
        }
    }

    /// Match one of the unit's spellings at `pos`, returning the matched
    /// length in chars.
    pub(crate) fn match_at(self, chars: &[char], pos: usize) -> Option<usize> {
        self.spellings().iter().find_map(|spelling| {
            let mut i = pos;
            for c in spelling.chars() {
                if chars.get(i) != Some(&c) {
                    return None;
                }
                i += 1;
            }
            Some(i - pos)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hertz_spellings() {
        let upper: Vec<char> = "Hz".chars().collect();
        let lower: Vec<char> = "hz".chars().collect();
        assert_eq!(Unit::Hertz.match_at(&upper, 0), Some(2));
        assert_eq!(Unit::Hertz.match_at(&lower, 0), Some(2));
        assert_eq!(Unit::Second.match_at(&upper, 0), None);
    }

    #[test]
    fn test_second_spelling() {
        let chars: Vec<char> = "5s".chars().collect();
        assert_eq!(Unit::Second.match_at(&chars, 1), Some(1));
        assert_eq!(Unit::Second.match_at(&chars, 0), None);
    }
}

use std::fmt;
use std::str::FromStr;

/// Supported rotation angles. 270 and -90 are the same physical turn, so
/// they parse to the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Right,
    Flip,
    Left,
}

impl Rotation {
    /// The `-vf` tokens for this angle. ffmpeg has no 180° transpose, hence
    /// the double token for `Flip`.
    pub fn filter_tokens(self) -> &'static [&'static str] {
        match self {
            Rotation::Right => &["transpose=1"],
            Rotation::Flip => &["transpose=2", "transpose=2"],
            Rotation::Left => &["transpose=2"],
        }
    }
}

#[derive(Debug)]
pub struct InvalidRotation {
    value: String,
}

impl fmt::Display for InvalidRotation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Rotation {} is incorrect", self.value)
    }
}

impl FromStr for Rotation {
    type Err = InvalidRotation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "90" => Ok(Rotation::Right),
            "180" => Ok(Rotation::Flip),
            "270" | "-90" => Ok(Rotation::Left),
            _ => Err(InvalidRotation { value: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ninety_is_one_token() {
        assert_eq!("90".parse::<Rotation>().unwrap().filter_tokens(), ["transpose=1"]);
    }

    #[test]
    fn two_seventy_is_the_inverse_token() {
        assert_eq!("270".parse::<Rotation>().unwrap().filter_tokens(), ["transpose=2"]);
    }

    #[test]
    fn minus_ninety_matches_two_seventy() {
        assert_eq!("-90".parse::<Rotation>().unwrap(), "270".parse::<Rotation>().unwrap());
    }

    #[test]
    fn one_eighty_is_a_double_transpose() {
        assert_eq!("180".parse::<Rotation>().unwrap().filter_tokens(), ["transpose=2", "transpose=2"]);
    }

    #[test]
    fn other_angles_are_rejected() {
        let err = "45".parse::<Rotation>().unwrap_err();
        assert_eq!(err.to_string(), "Rotation 45 is incorrect");
    }
}

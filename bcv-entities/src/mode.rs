use std::fmt;
use strum::{EnumString, IntoStaticStr};

/// How a trip leg was travelled, as chosen in the survey form.
///
/// Unknown choices are kept verbatim so they can be written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
pub enum TravelMode {
    Bus,
    Minibus,
    SpeedBoat,
    Lancha,
    #[strum(default)]
    Other(String),
}

impl TravelMode {
    pub fn from_choice(name: &str) -> Self {
        name.parse()
            .unwrap_or_else(|_| Self::Other(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Other(name) => name,
            known => <&'static str>::from(known),
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(self.as_str())
    }
}

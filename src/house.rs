use serde::{Serialize, Serializer};

use crate::zodiac::{map_sign, ZodiacSign};

// ---------------------------
// ## Houses
// ---------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum House {
    First = 1,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
    Ninth,
    Tenth,
    Eleventh,
    Twelfth,
}

const ALL_HOUSES: [House; 12] = [
    House::First,
    House::Second,
    House::Third,
    House::Fourth,
    House::Fifth,
    House::Sixth,
    House::Seventh,
    House::Eighth,
    House::Ninth,
    House::Tenth,
    House::Eleventh,
    House::Twelfth,
];

impl House {
    pub fn from_number(number: usize) -> Option<House> {
        match number {
            1 => Some(House::First),
            2 => Some(House::Second),
            3 => Some(House::Third),
            4 => Some(House::Fourth),
            5 => Some(House::Fifth),
            6 => Some(House::Sixth),
            7 => Some(House::Seventh),
            8 => Some(House::Eighth),
            9 => Some(House::Ninth),
            10 => Some(House::Tenth),
            11 => Some(House::Eleventh),
            12 => Some(House::Twelfth),
            _ => None,
        }
    }

    /// House number in 1..=12.
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn all() -> impl Iterator<Item = House> {
        ALL_HOUSES.iter().copied()
    }

    /// The house counted `offset` signs after the first, wrapping modulo 12.
    fn from_offset(offset: usize) -> House {
        ALL_HOUSES[offset % 12]
    }
}

impl Serialize for House {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

/// Whole-sign house of a body relative to the ascendant.
///
/// The ascendant's sign is the first house and every following sign is the
/// next house, so only the two sign indices matter.
pub fn assign_house(body_longitude: f64, ascendant_longitude: f64) -> House {
    let body_sign = map_sign(body_longitude).sign;
    let ascendant_sign = map_sign(ascendant_longitude).sign;
    house_of_sign(body_sign, ascendant_sign)
}

pub fn house_of_sign(sign: ZodiacSign, ascendant_sign: ZodiacSign) -> House {
    House::from_offset(sign.index() + 12 - ascendant_sign.index())
}

/// Sign occupying `house` when the ascendant falls in `ascendant_sign`.
pub fn sign_of_house(house: House, ascendant_sign: ZodiacSign) -> ZodiacSign {
    ZodiacSign::from_index(ascendant_sign.index() + house.number() as usize - 1)
}

//! Element and modality classification of the signs.
//!
//! Each element holds three signs and each modality four; both tables are
//! fixed and indexed by sign order.

use crate::western::signs::Sign;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

// Elements cycle fire, earth, air, water; modalities cycle cardinal, fixed, mutable.
const ELEMENTS: [Element; 12] = [
    Element::Fire,  // Aries
    Element::Earth, // Taurus
    Element::Air,   // Gemini
    Element::Water, // Cancer
    Element::Fire,  // Leo
    Element::Earth, // Virgo
    Element::Air,   // Libra
    Element::Water, // Scorpio
    Element::Fire,  // Sagittarius
    Element::Earth, // Capricorn
    Element::Air,   // Aquarius
    Element::Water, // Pisces
];

const MODALITIES: [Modality; 12] = [
    Modality::Cardinal, // Aries
    Modality::Fixed,    // Taurus
    Modality::Mutable,  // Gemini
    Modality::Cardinal, // Cancer
    Modality::Fixed,    // Leo
    Modality::Mutable,  // Virgo
    Modality::Cardinal, // Libra
    Modality::Fixed,    // Scorpio
    Modality::Mutable,  // Sagittarius
    Modality::Cardinal, // Capricorn
    Modality::Fixed,    // Aquarius
    Modality::Mutable,  // Pisces
];

pub fn element_of(sign: Sign) -> Element {
    ELEMENTS[sign.index()]
}

pub fn modality_of(sign: Sign) -> Modality {
    MODALITIES[sign.index()]
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Fire, Element::Earth, Element::Air, Element::Water];

    /// Signs of this element in zodiac order.
    pub fn signs(self) -> Vec<Sign> {
        Sign::ALL.into_iter().filter(|s| element_of(*s) == self).collect()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Water => "Water",
        }
    }
}

impl Modality {
    pub const ALL: [Modality; 3] = [Modality::Cardinal, Modality::Fixed, Modality::Mutable];

    /// Signs of this modality in zodiac order.
    pub fn signs(self) -> Vec<Sign> {
        Sign::ALL.into_iter().filter(|s| modality_of(*s) == self).collect()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Modality::Cardinal => "Cardinal",
            Modality::Fixed => "Fixed",
            Modality::Mutable => "Mutable",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

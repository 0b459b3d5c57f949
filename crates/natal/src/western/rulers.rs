//! Sign rulers for Western astrology.
//!
//! Maps zodiac signs to their planetary rulers. Scorpio, Aquarius and Pisces
//! carry both a modern ruler (listed first) and their traditional one.

use crate::ephemeris::Body;
use crate::western::signs::Sign;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered ruler pair; `secondary` is only set for dual-ruled signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ruler {
    pub primary: Body,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<Body>,
}

impl Ruler {
    const fn single(body: Body) -> Self {
        Self { primary: body, secondary: None }
    }

    const fn dual(modern: Body, traditional: Body) -> Self {
        Self { primary: modern, secondary: Some(traditional) }
    }

    /// Modern rulership (outer planets included).
    pub fn modern(&self) -> Body {
        self.primary
    }

    /// Classical rulership, limited to the seven visible bodies.
    pub fn traditional(&self) -> Body {
        self.secondary.unwrap_or(self.primary)
    }

    pub fn is_dual(&self) -> bool {
        self.secondary.is_some()
    }
}

impl fmt::Display for Ruler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.secondary {
            Some(second) => write!(f, "{}/{}", self.primary, second),
            None => write!(f, "{}", self.primary),
        }
    }
}

const RULERS: [Ruler; 12] = [
    Ruler::single(Body::Mars),                // Aries
    Ruler::single(Body::Venus),               // Taurus
    Ruler::single(Body::Mercury),             // Gemini
    Ruler::single(Body::Moon),                // Cancer
    Ruler::single(Body::Sun),                 // Leo
    Ruler::single(Body::Mercury),             // Virgo
    Ruler::single(Body::Venus),               // Libra
    Ruler::dual(Body::Pluto, Body::Mars),     // Scorpio
    Ruler::single(Body::Jupiter),             // Sagittarius
    Ruler::single(Body::Saturn),              // Capricorn
    Ruler::dual(Body::Uranus, Body::Saturn),  // Aquarius
    Ruler::dual(Body::Neptune, Body::Jupiter), // Pisces
];

/// Ruling body (or bodies) of a sign.
pub fn ruler_of(sign: Sign) -> Ruler {
    RULERS[sign.index()]
}

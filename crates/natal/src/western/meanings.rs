use crate::western::elements::Element;
use crate::western::signs::Sign;

const DESCRIPTIONS: [&str; 12] = [
    "impulsive, energetic, an initiator. Loves a challenge and acts with courage.",
    "steady, practical, fond of comfort and security. Patient and stubborn.",
    "curious, communicative, adaptable. A lively mind, at times scattered.",
    "sensitive, protective, emotional. Strong ties to family.",
    "proud, creative, wants attention and recognition. Generous.",
    "analytical, precise, service-minded. Attentive to detail.",
    "harmonious, relational, seeks balance and beauty. Diplomatic.",
    "intense, deep, transformative. Mysterious and determined.",
    "optimistic, freedom-loving, a philosophical explorer.",
    "ambitious, disciplined, realistic. Seeks structure and status.",
    "original, progressive, cerebral. Collective values and independence.",
    "sensitive, empathetic, imaginative. Often spiritual or idealistic.",
];

/// Short character sketch for a sign.
pub fn description_of(sign: Sign) -> &'static str {
    DESCRIPTIONS[sign.index()]
}

/// Activities that suit a solar element.
pub fn activities_for(element: Element) -> &'static str {
    match element {
        Element::Fire => "sport, leadership and starting new projects",
        Element::Earth => "crafts, gardening and steady long-term building",
        Element::Air => "study, conversation and meeting new people",
        Element::Water => "art, caring for others and quiet time near water",
    }
}

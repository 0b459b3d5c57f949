pub mod elements;
pub mod meanings;
pub mod rulers;
pub mod signs;

pub use elements::{element_of, modality_of, Element, Modality};
pub use meanings::{activities_for, description_of};
pub use rulers::{ruler_of, Ruler};
pub use signs::{classify, normalize_degrees, Sign, SignPosition, SIGN_SPAN};

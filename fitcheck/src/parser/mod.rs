pub mod extract;
pub mod patch;
pub mod schema;

pub use extract::SpecExtractor;
pub use patch::SpecPatch;
pub use schema::{EnclosureRating, ParsedSpecs, Phase, ProductType};

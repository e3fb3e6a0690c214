pub mod identifiers;
pub mod laterality;
pub mod tags;
pub mod view_position;

pub use identifiers::StudyIdentifiers;
pub use laterality::extract_laterality;
pub use tags::*;
pub use view_position::{extract_view, extract_view_position};

pub mod candidate;
pub mod pexels;
pub mod post_record;

pub use candidate::Candidate;
pub use pexels::{PexelsPhoto, PexelsSearchPage, PhotoSources};
pub use post_record::PostRecord;

pub mod candidate_source;
pub mod image_analysis;
pub mod publishing;
pub mod text_filter;

pub use candidate_source::{CandidateSource, PexelsSource};
pub use image_analysis::{average_hash, HttpImageAnalysis, ImageAnalysis};
pub use publishing::{build_caption, FacebookPublisher, PublishResponse, PublishingService};
pub use text_filter::{is_acceptable_extension, Denylist};

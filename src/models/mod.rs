pub mod movie;
pub mod similarity;

pub use movie::{MovieId, MovieRecord, MovieSummary};
pub use similarity::SimilarityMatrix;

pub mod posters;
pub mod recommender;
pub mod store;

pub use posters::PosterUrls;
pub use recommender::{rank, recommend, recommend_by_id, Ranked};
pub use store::{DuplicateTitlePolicy, SimilarityStore, StoreInfo};

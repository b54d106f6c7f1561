pub mod client;
pub mod error;
pub mod gateway;
pub mod matching;
pub mod query;
pub mod resolver;
pub mod reviews;
pub(crate) mod retry;
pub mod similarity;
pub mod throttle;
pub mod types;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use gateway::{Candidate, DetailRecord, PlacesGateway};
pub use matching::{select_best_match, MatchResult};
pub use query::extract_business_name;
pub use resolver::{Resolver, DEFAULT_PAGE_SIZE};
pub use reviews::{normalize_review, parse_reviews};
pub use similarity::score;
pub use throttle::RequestThrottle;

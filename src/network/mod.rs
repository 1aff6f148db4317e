pub mod fetcher;
pub mod registry;
pub mod resolver;

pub use fetcher::{ChainFetcher, ChainResponse, HttpChainFetcher};
pub use registry::PeerRegistry;
pub use resolver::{fetch_all, select_longest};

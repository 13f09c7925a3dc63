//! Query cache and mutation layer.
//!
//! Reads go through [`QueryClient::fetch_query`] under a [`QueryKey`]; writes go
//! through [`run_mutation`], which invalidates the keys a write affects.

pub mod cache;
pub mod key;
pub mod mutation;
pub mod state;

pub use cache::{CacheOptions, CacheStats, QueryClient, Revalidation};
pub use key::{QueryKey, Resource};
pub use mutation::{MutationKind, run_mutation};
pub use state::QueryState;

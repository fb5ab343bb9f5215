//! Query composition and execution.
//!
//! The layered split: `spec` holds the typed query specifications, `builder`
//! compiles them to parameterized statements, `cache` memoizes results per
//! spec, and `executor` ties the three to the database client.

pub mod builder;
pub mod cache;
pub mod executor;
pub mod spec;

pub use cache::{CacheKey, QueryCache, DEFAULT_TTL};
pub use executor::Runner;
pub use spec::{
    CaptainRanking, Choice, DangerIndex, FruitHolders, OptionList, PiratesByCrewBounty,
    PoneglyphListing, QuerySpec, Statement, TemplateId,
};

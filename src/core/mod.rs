//! Accessors for every resource, plus the scoping value they all take.
//!
//! Functions here talk to the backend and return `Result`; they know nothing
//! about the query cache.

pub mod category;
/// Seeding of categories and fixed expenses from config.toml
pub mod defaults;
pub mod expense;
pub mod fixed_expense;
/// Legacy households and scope resolution
pub mod household;
pub mod income;
pub mod investment;
/// Monthly and holdings summaries
pub mod report;
pub mod reserve;
pub mod scope;
pub mod user;
/// Input validation shared by the accessors
pub mod validate;

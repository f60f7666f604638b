pub mod cli;
pub mod cmd;
pub mod fixture;

pub use fixture::FixtureSource;

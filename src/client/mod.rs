pub mod api;
pub mod fixtures;
pub mod graphql;
pub mod mock;

pub use api::{BackendConfig, CompetitionApi};
pub use graphql::GqlBackend;
pub use mock::FixtureBackend;

#[cfg(test)]
pub use api::MockCompetitionApi;

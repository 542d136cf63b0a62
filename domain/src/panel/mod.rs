//! Panel subdomain: the single state value, its reducer and the persisted snapshot.

pub mod snapshot;
pub mod state;

// User profile and onboarding. The profile's industry key selects which insight a user sees.

pub mod handlers;
pub mod models;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

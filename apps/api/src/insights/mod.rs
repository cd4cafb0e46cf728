// Industry insights: AI-generated salary, demand and skills data cached per industry.
// All model calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub mod bindings;
pub mod client;
pub mod provider;
pub mod registry;
pub mod submitter;

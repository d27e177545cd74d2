#![doc = "The `fleetdesk` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, persistence layer, notification"]
#![doc = "client, authentication mechanisms, routing configuration, and error"]
#![doc = "handling for the fleetdesk application. It is used by the main binary"]
#![doc = "(`main.rs`) to construct and run the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod routes;
pub mod store;

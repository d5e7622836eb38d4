use serde::Deserialize;
use tracing::info;

use crate::seed::records::{Client, RouteSpec, Sale, Site, Ticket};

/// The full fixture set used to populate the dashboard structures.
///
/// Either bundled into the binary ([`SeedData::embedded`]) or read
/// from a JSON file with the same shape ([`SeedData::from_path`]).
#[derive(Debug, Clone, Deserialize)]
pub struct SeedData {
    pub clients: Vec<Client>,
    pub tickets: Vec<Ticket>,
    pub sales: Vec<Sale>,
    pub sites: Vec<Site>,
    pub routes: Vec<RouteSpec>,
}

impl SeedData {
    /// Returns the fixture set compiled into the binary.
    ///
    /// # Panics
    /// Panics if the bundled JSON no longer matches the record shapes,
    /// which can only happen when the data file is edited by hand.
    pub fn embedded() -> Self {
        let data: SeedData = serde_json::from_str(include_str!("../../data/seed.json"))
            .expect("Bundled seed data is corrupt. data/seed.json must deserialize into SeedData.");
        info!(
            clients = data.clients.len(),
            tickets = data.tickets.len(),
            sales = data.sales.len(),
            sites = data.sites.len(),
            routes = data.routes.len(),
            "embedded seed loaded"
        );
        data
    }

    /// Reads a fixture set from a JSON file at `path`.
    ///
    /// # Panics
    /// Panics when the file cannot be read or does not parse, with the
    /// offending path in the message.
    pub fn from_path(path: &str) -> Self {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|err| panic!("Cannot read seed file {path}: {err}"));
        let data: SeedData = serde_json::from_str(&text)
            .unwrap_or_else(|err| panic!("Seed file {path} is not valid seed JSON: {err}"));
        info!(path, "seed file loaded");
        data
    }
}

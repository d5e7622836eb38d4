use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A registered client of the pharmacy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: u32,
    pub name: String,
}

/// Orders clients by id, ignoring the name payload.
pub fn client_order(a: &Client, b: &Client) -> Ordering {
    a.id.cmp(&b.id)
}

/// A numbered ticket waiting at the service window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub number: u32,
    pub client: String,
}

/// A completed sale, amounts kept in cents to stay exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    pub total_cents: u32,
}

/// A pharmacy site in the delivery network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub code: String,
    pub city: String,
}

/// One directed leg of the delivery network, by site code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSpec {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
    pub carrier: Option<String>,
}

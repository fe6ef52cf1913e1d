/// Larva rearing data-entry service.
///
/// Operators pick a production unit and tank, enter water-quality
/// measurements, and persist records to a shared worksheet-backed store.
/// Core logic is a fixed tank catalog, a navigation state machine, a
/// per-tank history filter, and a fetch → append → replace-all
/// persistence workflow; the terminal front-end lives in the `larvalog`
/// binary.

pub mod config;
pub mod dashboard;
pub mod entry;
pub mod history;
pub mod logging;
pub mod model;
pub mod nav;
pub mod store;
pub mod units;
pub mod workflow;

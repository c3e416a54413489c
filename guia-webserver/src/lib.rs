#![allow(proc_macro_derive_resolution_fallback)]
#![recursion_limit = "128"]

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

use guia_core::gateways::image_storage::ImageStorageGateway;
use guia_db_sqlite::Connections;

mod adapters;
mod core;
mod web;

pub use web::Cfg;

pub async fn run(
    connections: Connections,
    enable_cors: bool,
    cfg: Cfg,
    image_store: Box<dyn ImageStorageGateway + Send + Sync>,
) {
    web::run(connections.into(), enable_cors, cfg, image_store).await;
}

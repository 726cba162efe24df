pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod ranking;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{listing_service::ListingService, user_service::UserService};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub listing_service: ListingService,
    pub user_service: UserService,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let listing_service = ListingService::new(pool.clone());
        let user_service = UserService::new(pool.clone());

        Self {
            pool,
            listing_service,
            user_service,
        }
    }
}

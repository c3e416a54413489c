use anyhow::anyhow;
use diesel::{
    self,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};

use guia_core::{
    entities::*,
    repositories::{self as repo, *},
};

use super::*;

mod category;
mod listing;
mod listing_type;
mod user;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            repo::Error::AlreadyExists
        }
        _ => repo::Error::Other(err.into()),
    }
}

fn load_listing_status(status: ListingStatusPrimitive) -> Result<ListingStatus> {
    ListingStatus::try_from(status)
        .map_err(|_| anyhow!("Invalid listing status: {status}").into())
}

fn load_user_role(role: RolePrimitive) -> Role {
    Role::try_from(role).unwrap_or_else(|_| {
        // This should never happen
        log::warn!("Invalid user role: {role}");
        Role::Guest
    })
}

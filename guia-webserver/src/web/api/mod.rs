use std::{fmt::Display, result};

use rocket::serde::json::{Error as JsonError, Json};
use rocket::{
    self, delete, get,
    http::{Cookie, CookieJar, Status},
    patch, post,
    response::{self, Responder},
    routes, Route, State,
};

use super::guards::*;
use crate::{
    adapters::json::{self, from_json, to_json},
    core::{prelude::*, usecases},
    web::{jwt, sqlite},
};
use guia_application::prelude as flows;
use guia_core::usecases::Error as ParameterError;

mod categories;
mod error;
mod listing_types;
mod listings;
mod users;
mod util;

pub use self::error::Error as ApiError;

#[cfg(test)]
pub mod tests;

type Result<T> = result::Result<Json<T>, ApiError>;
type JsonResult<'a, T> = result::Result<Json<T>, JsonError<'a>>;
type StatusResult = result::Result<Status, ApiError>;

pub fn routes() -> Vec<Route> {
    routes![
        // ---   listings   --- //
        listings::get_search,
        listings::get_public_listing,
        listings::get_my_listings,
        listings::get_listing,
        listings::post_listing,
        listings::post_update_listing,
        listings::patch_listing_status,
        listings::delete_listing,
        // ---   listing types   --- //
        listing_types::get_listing_types,
        listing_types::get_listing_type_schema,
        listing_types::post_listing_type,
        listing_types::patch_listing_type,
        listing_types::delete_listing_type,
        // ---   categories   --- //
        categories::get_top_level_categories,
        categories::get_all_categories,
        categories::get_subcategories,
        categories::post_category,
        categories::patch_category,
        categories::delete_category,
        // ---   users   --- //
        users::post_login,
        users::post_logout,
        users::post_user,
        users::get_current_user,
        users::delete_user,
    ]
}

fn json_error_response<'r, 'o: 'r, E: Display>(
    req: &'r rocket::Request<'_>,
    err: &E,
    status: Status,
) -> response::Result<'o> {
    let message = err.to_string();
    let error_response = json::ErrorResponse {
        http_status: status.code,
        message,
    };
    Json(error_response).respond_to(req).map(|mut res| {
        res.set_status(status);
        res
    })
}

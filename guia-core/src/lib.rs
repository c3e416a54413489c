pub mod entities {
    pub use guia_entities::{
        category::*, email::*, geo::*, id::*, listing::*, listing_type::*, password::*, status::*,
        time::*, user::*,
    };
}

pub mod authorization;
pub mod bbox;
pub mod db;
pub mod gateways;
pub mod repositories;
pub mod text;
pub mod usecases;
pub mod util;

pub use self::repositories::Error as RepoError;

use crate::repositories::*;

pub trait Db: ListingRepo + CategoryRepo + ListingTypeRepo + UserRepo {}

impl<T> Db for T where T: ListingRepo + CategoryRepo + ListingTypeRepo + UserRepo {}

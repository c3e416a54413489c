pub use guia_core::gateways::image_storage::ImageStorageGateway;

mod http;
mod local_dir;

pub use self::{http::HttpImageStore, local_dir::DirImageStore};

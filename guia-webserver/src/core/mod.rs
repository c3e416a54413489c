pub use guia_core::{repositories, util};

pub mod entities {
    pub use guia_core::entities::*;
}

pub mod usecases {
    pub use guia_core::usecases::*;
}

pub mod prelude {
    pub use super::{entities::*, repositories::*};
}

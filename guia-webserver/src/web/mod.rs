use guia_core::gateways::image_storage::ImageStorageGateway;

use rocket::{
    config::Config as RocketCfg,
    data::{Limits, ToByteUnit},
    Rocket, Route,
};

pub mod api;
mod guards;
pub mod jwt;
mod sqlite;


#[derive(Debug, Clone, Default)]
pub struct Cfg {
    /// Secret for signing JWTs. A random one is generated if missing.
    pub token_secret: Option<String>,
}

pub(crate) struct InstanceOptions {
    mounts: Vec<(&'static str, Vec<Route>)>,
    rocket_cfg: Option<RocketCfg>,
    cfg: Cfg,
}

pub(crate) struct Gateways {
    image_store: Box<dyn ImageStorageGateway + Send + Sync>,
}

pub(crate) struct Connections {
    db: sqlite::Connections,
}

pub(crate) fn rocket_instance(
    options: InstanceOptions,
    connections: Connections,
    gateways: Gateways,
) -> Rocket<rocket::Build> {
    let InstanceOptions {
        mounts,
        rocket_cfg,
        cfg,
    } = options;
    let Connections { db } = connections;
    let Gateways { image_store } = gateways;

    let jwt_state = jwt::JwtState::new(cfg.token_secret.as_deref());
    let image_store = guards::ImageStore(image_store);

    info!("Initialization finished");

    // The default form limits are too small for image uploads.
    let figment = match rocket_cfg {
        Some(cfg) => rocket::figment::Figment::from(cfg),
        None => RocketCfg::figment(),
    }
    .merge((
        "limits",
        Limits::default()
            .limit("file", 4.mebibytes())
            .limit("data-form", 32.mebibytes()),
    ));

    let mut instance = rocket::custom(figment)
        .manage(db)
        .manage(jwt_state)
        .manage(image_store);

    for (m, r) in mounts {
        instance = instance.mount(m, r);
    }
    instance
}

fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/api", api::routes())]
}

pub async fn run(
    db: sqlite::Connections,
    enable_cors: bool,
    cfg: Cfg,
    image_store: Box<dyn ImageStorageGateway + Send + Sync>,
) {
    let options = InstanceOptions {
        mounts: mounts(),
        rocket_cfg: None,
        cfg,
    };
    let connections = Connections { db };
    let gateways = Gateways { image_store };

    let instance = rocket_instance(options, connections, gateways);
    let server_task = if enable_cors {
        match rocket_cors::CorsOptions::default().to_cors() {
            Ok(cors) => instance.attach(cors).launch(),
            Err(err) => {
                log::error!("Unable to configure CORS: {err}");
                return;
            }
        }
    } else {
        instance.launch()
    };
    if let Err(err) = server_task.await {
        log::error!("Unable to run web server: {err}");
    }
}

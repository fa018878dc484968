mod app;
mod bindings;
mod config;
mod context;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ripple_engine::device::GpuInit;
use ripple_engine::logging::{init_logging, LoggingConfig};
use ripple_engine::window::Runtime;

use app::DemoApp;
use config::DemoConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = DemoConfig::default().with_env_overrides()?;
    let mut rng = match config.seed {
        Some(seed) => {
            log::info!("aRandom seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let app = DemoApp::new(&config, &mut rng);
    Runtime::run(config.runtime(), GpuInit::default(), app)
}

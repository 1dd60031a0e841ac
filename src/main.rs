use anyhow::Context;
use cossim_harness::HostInfo;
use cossim_kernels::max_lane_width;
use cossim_shared::{AppEnv, AppError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), AppError> {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("{}=debug,cossim_harness=debug", env!("CARGO_CRATE_NAME")).into()
      }),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .with(tracing_error::ErrorLayer::default())
    .init();
  dotenvy::dotenv().ok();

  let app_env = AppEnv::from_env().context("cossim: invalid configuration")?;

  let host = HostInfo::current();
  tracing::info!(
    arch = host.arch,
    detected_width = %host.detected_width,
    portable_width = %host.portable_width,
    max_lanes = max_lane_width(),
    avx512f = host.avx512f,
    "Detected SIMD capabilities"
  );

  if let Some(report) = cossim_harness::run(&app_env)? {
    println!("{}", report.render(app_env.format)?);
  }

  Ok(())
}

use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glidescroll_core::{AppConfig, Host, ScrollOptions, Scroller, SimViewport};

#[derive(Parser)]
#[command(name = "glidescroll")]
#[command(version, about = "Smooth-scroll animation engine demo")]
struct Cli {
    /// Animation duration in seconds
    #[arg(long)]
    time: Option<f64>,

    /// Animation ticks per second
    #[arg(long)]
    fps: Option<u32>,

    /// Extra offset above the target, in pixels (may be negative)
    #[arg(long)]
    offset_y: Option<i64>,

    /// Lock user scrolling out instead of letting it cancel the
    /// animation
    #[arg(long)]
    no_interrupt: bool,

    /// Simulate a user wheel gesture after this many ticks
    #[arg(long)]
    wheel_at: Option<u32>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;
    let mut options = config.scroll;
    if let Some(time) = cli.time {
        options.time = time;
    }
    if let Some(fps) = cli.fps {
        options.fps = fps;
    }
    if let Some(offset_y) = cli.offset_y {
        options.offset_y = offset_y;
    }
    options.interruptable = !cli.no_interrupt;

    // A simulated page: body > section at 400px > heading 250px into it,
    // with the viewport scrolled well past the heading.
    let viewport = SimViewport::new();
    let body = viewport.insert_element(0, None);
    let section = viewport.insert_element(400, Some(body));
    let heading = viewport.insert_element(250, Some(section));
    viewport.user_scroll(1200);

    let scroller = Scroller::new(Rc::new(viewport.clone())).with_easing(config.easing.curve());

    info!(
        "Scrolling from y={} to the heading at y=650 (time={}s, fps={}, interruptable={})",
        viewport.scroll_y(),
        options.time,
        options.fps,
        options.interruptable
    );

    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let handle = scroller.scroll_to(heading, options);

            if let Some(at) = cli.wheel_at {
                let fps = options.fps.max(1);
                let delay = Duration::from_secs_f64(f64::from(at) / f64::from(fps));
                let viewport = viewport.clone();
                tokio::task::spawn_local(async move {
                    tokio::time::sleep(delay).await;
                    if viewport.wheel(-120) {
                        info!("User wheel was suppressed by the scroll lock");
                    } else {
                        info!("User wheel moved the page to y={}", viewport.scroll_y());
                    }
                });
            }

            match handle.wait().await {
                Ok(()) => info!("Scroll finished at y={}", viewport.scroll_y()),
                Err(e) => warn!("Scroll did not finish: {e}"),
            }

            info!("Positions applied by the engine: {:?}", viewport.applied());
        })
        .await;

    Ok(())
}

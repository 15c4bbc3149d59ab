use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, ensure};
use clap::Parser;
use price_filter::{
    filter::{FilterProps, PriceFilter},
    gesture::{PointerInput, ResponderHost},
    theme::Theme,
};

mod script;
use script::{Step, TouchScript};

const FRAME: Duration = Duration::from_millis(16);
const MAX_SETTLE_FRAMES: usize = 120;
const TOUCH_ID: u64 = 1;
const SCREEN_TOP: f32 = 120.0;

#[derive(Parser)]
#[command(name = "price-filter-demo")]
#[command(version, about = "Mounts a price filter and replays a touch script against it", long_about = None)]
struct Cli {
    /// Lower bound of the filter
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    minimum: f64,
    /// Upper bound of the filter
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    maximum: f64,
    /// Controlled value for the low thumb
    #[arg(long, allow_negative_numbers = true)]
    low: Option<f64>,
    /// Controlled value for the high thumb
    #[arg(long, allow_negative_numbers = true)]
    high: Option<f64>,
    /// Snap values to multiples of this step
    #[arg(long)]
    step: Option<f64>,
    /// Currency symbol printed before prices
    #[arg(long, default_value = "£")]
    currency: String,
    /// Screen width the filter is laid out in
    #[arg(long, default_value_t = 390.0)]
    screen_width: f32,
    /// TOML theme file (defaults to the built-in theme)
    #[arg(long)]
    theme: Option<PathBuf>,
    /// Gesture to replay, e.g. "down:120 move:180 up" (screen x offsets)
    #[arg(long, default_value = "down:80 move:140 move:180 up down:300 move:250 up")]
    script: TouchScript,
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("info,price_filter=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("info"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .try_init();
}

fn load_theme(path: Option<&PathBuf>) -> Result<Theme> {
    match path {
        Some(path) => Theme::load(path)
            .with_context(|| format!("failed to load theme from {}", path.display())),
        None => Ok(Theme::default()),
    }
}

/// Steps animations until they settle, returning the advanced clock.
fn settle(filter: &mut PriceFilter, mut now: Instant) -> Instant {
    for _ in 0..MAX_SETTLE_FRAMES {
        now += FRAME;
        if !filter.slider_mut().advance(now) {
            break;
        }
    }
    now
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    ensure!(
        cli.screen_width > 0.0,
        "screen width must be positive, got {}",
        cli.screen_width
    );

    let theme = load_theme(cli.theme.as_ref())?;
    let container_width = theme.price_slider.width * cli.screen_width;
    let origin_x = (cli.screen_width - container_width) / 2.0;
    let touch_y = SCREEN_TOP + theme.price_slider.minimum.diameter / 2.0;

    let mut props = FilterProps::new(cli.minimum, cli.maximum)
        .currency(cli.currency)
        .on_value_release(|state| {
            tracing::info!(
                minimum = state.minimum,
                maximum = state.maximum,
                "DISPATCHING"
            );
        });
    props.low_value = cli.low;
    props.high_value = cli.high;
    props.step = cli.step;

    let mut filter = PriceFilter::new(props, theme.shared());
    filter.slider_mut().on_layout(container_width);
    tracing::info!(container_width, origin_x, "mounted price filter");

    let mut host = ResponderHost::new(origin_x, SCREEN_TOP);
    let mut now = Instant::now();
    let mut last_x = origin_x;
    for step in &cli.script.steps {
        let input = match *step {
            Step::Down(x) => PointerInput::down(TOUCH_ID, x, touch_y),
            Step::Move(x) => PointerInput::moved(TOUCH_ID, x, touch_y),
            Step::Up => PointerInput::up(TOUCH_ID, last_x, touch_y),
        };
        last_x = input.page_x;
        host.dispatch(filter.slider_mut(), input, now);
        now = settle(&mut filter, now);

        let labels = filter.labels();
        tracing::debug!(
            minimum = %labels.minimum,
            maximum = %labels.maximum,
            commands = filter.render().len(),
            "frame"
        );
    }

    let labels = filter.labels();
    println!(
        "{}: {}    {}: {}",
        labels.minimum_caption, labels.minimum, labels.maximum_caption, labels.maximum
    );
    Ok(())
}

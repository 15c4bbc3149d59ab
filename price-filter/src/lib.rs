//! A headless dual-thumb price range slider and the filter built on it.
//!
//! # Usage
//!
//! The host owns the window, the layout pass and the frame clock. It reports
//! the container width, routes raw touches through a
//! [`ResponderHost`](gesture::ResponderHost), steps animations once per frame
//! and draws the returned commands.
//!
//! ```
//! use std::time::Instant;
//!
//! use price_filter::{
//!     filter::{FilterProps, PriceFilter},
//!     gesture::{PointerInput, ResponderHost},
//!     theme::Theme,
//! };
//!
//! let mut filter = PriceFilter::new(
//!     FilterProps::new(0.0, 100.0).on_value_release(|state| {
//!         println!("{} - {}", state.minimum, state.maximum);
//!     }),
//!     Theme::default().shared(),
//! );
//! filter.slider_mut().on_layout(432.0);
//!
//! let now = Instant::now();
//! let mut host = ResponderHost::new(0.0, 0.0);
//! host.dispatch(filter.slider_mut(), PointerInput::down(1, 136.0, 16.0), now);
//! host.dispatch(filter.slider_mut(), PointerInput::up(1, 136.0, 16.0), now);
//!
//! assert_eq!(filter.labels().minimum, "£30");
//! filter.slider_mut().advance(now);
//! let commands = filter.render();
//! assert!(!commands.is_empty());
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

mod animation;

pub mod error;
pub mod filter;
pub mod geometry;
pub mod gesture;
pub mod prop;
pub mod range;
pub mod slider;
pub mod theme;

pub use animation::{AnimatedValue, AnimationHandle, AnimationStatus};
pub use error::{Error, Result};
pub use filter::{FilterLabels, FilterProps, PriceFilter};
pub use slider::{PriceSlider, PriceState, SliderProps};
pub use theme::{Color, Theme};

//! Price filter: labelled wrapper around [`PriceSlider`].
//!
//! ## Usage
//!
//! Mount a [`PriceFilter`] where a screen needs a price range. It keeps the
//! last reported range for its labels and forwards releases to the owner.

use std::sync::Arc;

use derive_setters::Setters;
use parking_lot::RwLock;

use crate::{
    prop::CallbackWith,
    slider::{DrawList, PriceSlider, PriceState, SliderProps},
    theme::Theme,
};

const MINIMUM_CAPTION: &str = "Minimum";
const MAXIMUM_CAPTION: &str = "Maximum";

/// Arguments for [`PriceFilter`].
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct FilterProps {
    /// Lower bound of the slider.
    pub minimum: f64,
    /// Upper bound of the slider.
    pub maximum: f64,
    /// Controlled value for the low thumb.
    #[setters(strip_option)]
    pub low_value: Option<f64>,
    /// Controlled value for the high thumb.
    #[setters(strip_option)]
    pub high_value: Option<f64>,
    /// Optional step values snap to while dragging.
    #[setters(strip_option)]
    pub step: Option<f64>,
    /// Symbol printed before each price.
    #[setters(into)]
    pub currency: String,
    /// Called once when a gesture is released.
    #[setters(skip)]
    pub on_value_release: CallbackWith<PriceState>,
}

impl FilterProps {
    /// Props for a filter spanning `[minimum, maximum]`.
    pub fn new(minimum: f64, maximum: f64) -> Self {
        Self {
            minimum,
            maximum,
            ..Self::default()
        }
    }

    /// Sets the release handler.
    pub fn on_value_release<F>(mut self, on_value_release: F) -> Self
    where
        F: Fn(PriceState) + Send + Sync + 'static,
    {
        self.on_value_release = CallbackWith::new(on_value_release);
        self
    }
}

impl Default for FilterProps {
    fn default() -> Self {
        Self {
            minimum: 0.0,
            maximum: 100.0,
            low_value: None,
            high_value: None,
            step: None,
            currency: "£".to_string(),
            on_value_release: CallbackWith::noop(),
        }
    }
}

/// Caption and value text shown above the slider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterLabels {
    /// Caption over the low value.
    pub minimum_caption: &'static str,
    /// Caption over the high value.
    pub maximum_caption: &'static str,
    /// Formatted low value.
    pub minimum: String,
    /// Formatted high value.
    pub maximum: String,
}

/// Formats a price: amounts that are whole to the cent print without decimals,
/// anything else with two.
pub fn format_price(currency: &str, value: f64) -> String {
    let cents = (value * 100.0).round();
    if cents % 100.0 == 0.0 {
        format!("{currency}{value:.0}")
    } else {
        format!("{currency}{value:.2}")
    }
}

/// A [`PriceSlider`] with minimum/maximum labels.
#[derive(Debug)]
pub struct PriceFilter {
    slider: PriceSlider,
    display: Arc<RwLock<PriceState>>,
    currency: String,
}

impl PriceFilter {
    /// Creates a filter drawing with `theme`.
    pub fn new(props: FilterProps, theme: Arc<Theme>) -> Self {
        let display = Arc::new(RwLock::new(PriceState {
            minimum: props.low_value.unwrap_or(props.minimum),
            maximum: props.high_value.unwrap_or(props.maximum),
        }));
        let slider = PriceSlider::new(Self::slider_props(&props, &display), theme);
        Self {
            slider,
            display,
            currency: props.currency,
        }
    }

    fn slider_props(props: &FilterProps, display: &Arc<RwLock<PriceState>>) -> SliderProps {
        let display = Arc::clone(display);
        let mut slider_props = SliderProps::new(props.minimum, props.maximum)
            .on_value_change(move |state| *display.write() = state)
            .on_value_release_shared(props.on_value_release.clone());
        slider_props.low_value = props.low_value;
        slider_props.high_value = props.high_value;
        slider_props.step = props.step;
        slider_props
    }

    /// Replaces the props and lets the slider re-derive its range.
    pub fn set_props(&mut self, props: FilterProps) {
        let slider_props = Self::slider_props(&props, &self.display);
        self.currency = props.currency;
        self.slider.set_props(slider_props);
    }

    /// Last range reported by the slider.
    pub fn state(&self) -> PriceState {
        *self.display.read()
    }

    /// Label text for the current state.
    pub fn labels(&self) -> FilterLabels {
        let state = self.state();
        FilterLabels {
            minimum_caption: MINIMUM_CAPTION,
            maximum_caption: MAXIMUM_CAPTION,
            minimum: format_price(&self.currency, state.minimum),
            maximum: format_price(&self.currency, state.maximum),
        }
    }

    /// Wrapped slider.
    pub fn slider(&self) -> &PriceSlider {
        &self.slider
    }

    /// Wrapped slider, for routing touches and layout.
    pub fn slider_mut(&mut self) -> &mut PriceSlider {
        &mut self.slider
    }

    /// Draw commands for the slider part of the filter.
    pub fn render(&self) -> DrawList {
        self.slider.render()
    }
}

//! config/demo.rs Coefficients for the demo model helper.
//!
//! `make_demo_model` stamps these onto the tail of the historical table so the
//! dashboard can run without an externally exported model. They are fixed
//! values, not estimates.

/// Non-seasonal (p, d, q) part
pub struct DemoOrder {
    pub ar: &'static [f64],
    pub d: usize,
    pub ma: &'static [f64],
}

/// Seasonal (P, D, Q, s) part
pub struct DemoSeasonalOrder {
    pub ar: &'static [f64],
    pub d: usize,
    pub ma: &'static [f64],
    pub period: usize,
}

/// The Master Demo Configuration
pub struct DemoConfig {
    pub order: DemoOrder,
    pub seasonal: DemoSeasonalOrder,
    pub constant: f64,
    /// How many trailing closes are embedded in the model file
    pub history_len: usize,
    pub description: &'static str,
    pub output_path: &'static str,
}

pub const DEMO: DemoConfig = DemoConfig {
    order: DemoOrder {
        ar: &[0.35],
        d: 1,
        ma: &[-0.2],
    },
    seasonal: DemoSeasonalOrder {
        ar: &[0.1],
        d: 0,
        ma: &[],
        period: 5, // one trading week
    },
    constant: 0.05,
    history_len: 260, // roughly one trading year
    description: "Demo SARIMA(1,1,1)(1,0,0,5) with fixed coefficients",
    output_path: "sarima_model.bin",
};

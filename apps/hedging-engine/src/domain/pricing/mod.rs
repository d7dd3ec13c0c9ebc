//! Pricing Bounded Context
//!
//! Pure Black-Scholes model for vanilla and FX options:
//! - `d1`/`d2`, theoretical price, delta and gamma
//! - Moneyness classification and expiry payoff
//! - Forward price of a currency pair (ATM-forward strikes)

mod black_scholes;
mod errors;
mod forward;
mod option_type;

pub use black_scholes::{BlackScholesInputs, Rates, moneyness, norm_cdf, payoff};
pub use errors::PricingError;
pub use forward::{DAYS_PER_YEAR, forward_price};
pub use option_type::{OptionState, OptionType};

//! Motor de Preços: regional markup engine for the JapBase dashboard.
//!
//! [`domain::resolve_markup`] maps a sale (state, city, channel, category,
//! origin) to a markup multiplier and [`domain::compute_final_price`] applies
//! it to a base cost. Both are pure and never fail.

pub mod domain;
pub mod util;

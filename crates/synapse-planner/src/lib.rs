//! Route selection over Synapse quote results.
//!
//! - Best route: largest `maxAmountOut`
//! - Ties: first route in upstream order wins
//! - Empty list: hard failure, never a zero result

use synapse_client::Route;
use synapse_types::{BridgeError, Result};
use tracing::{info, warn};

/// Select the route with the largest destination-side output.
///
/// A left fold seeded with the first route; a later route replaces the
/// current best only when its output is strictly greater.
pub fn select_best_route(routes: &[Route]) -> Result<&Route> {
    let (first, rest) = routes.split_first().ok_or_else(|| {
        warn!("synapse returned no bridge routes");
        BridgeError::NoRoutes
    })?;

    let best = rest.iter().fold(first, |best, current| {
        if current.max_amount_out > best.max_amount_out {
            current
        } else {
            best
        }
    });

    info!(
        max_amount_out = %best.max_amount_out,
        bridge_module = best.bridge_module_name.as_deref().unwrap_or("unknown"),
        candidates = routes.len(),
        "selected synapse route"
    );

    Ok(best)
}

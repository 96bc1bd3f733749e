//! Display preflight check.

use super::CheckResult;
use crate::core::display::{Display, DisplayRegistry};
use futures::future::join_all;
use std::sync::Arc;

/// Check every display answers a browse request. Displays are probed
/// concurrently; results keep registration order.
pub async fn check(displays: &DisplayRegistry) -> Vec<CheckResult> {
    if displays.is_empty() {
        return vec![CheckResult::fail(
            "Displays",
            "none configured",
            "Add a [[displays]] entry with name and address to the config file",
        )];
    }

    join_all(displays.snapshot().into_iter().map(check_one)).await
}

async fn check_one(display: Arc<Display>) -> CheckResult {
    let name = format!("Display {}", display.name());
    match display.probe().await {
        Ok(targets) => match targets.first() {
            Some(target) => CheckResult::ok(&name, &format!("reachable ({})", target.name)),
            None => CheckResult::ok(&name, "reachable"),
        },
        Err(e) => CheckResult::fail(
            &name,
            &format!("not reachable at {}: {}", display.address(), e),
            "Make sure the device is on and AirPlay is enabled",
        ),
    }
}

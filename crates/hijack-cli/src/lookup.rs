//! `dns-hijack lookup`: resolve through the decorator without preloading
//! anything, and report what the layer would have done.

use anyhow::{bail, Result};
use console::style;
use hijack_config::Config;
use hijack_core::sys::SystemResolver;
use hijack_core::{Decision, HijackingResolver, Resolved, TracingLog};
use serde_json::json;

pub fn cmd_lookup(config: &Config, name: &str, json: bool) -> Result<()> {
    let resolver = HijackingResolver::new(SystemResolver, config.hijack_config(), TracingLog);

    let Some(Resolved { result, decision }) = resolver.resolve_traced(name)? else {
        bail!("{}: lookup failed", name);
    };

    if json {
        let decision = match decision {
            Decision::Replace { from, to } => json!({
                "action": "replace",
                "from": from.to_string(),
                "to": to.to_string(),
            }),
            Decision::Keep(reason) => json!({
                "action": "keep",
                "reason": reason.as_str(),
            }),
        };
        let out = json!({ "result": result, "decision": decision });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", style(&result.name).bold());
    for alias in &result.aliases {
        println!("  alias   {}", alias);
    }
    for (i, addr) in result.addresses.iter().enumerate() {
        if i == 0 && decision.is_replace() {
            println!("  address {} {}", style(addr).green(), style("(hijacked)").dim());
        } else {
            println!("  address {}", addr);
        }
    }
    match decision {
        Decision::Replace { from, .. } => {
            println!("{} was {}", style("hijack:").green().bold(), from)
        }
        Decision::Keep(reason) => {
            println!("{} {}", style("pass-through:").dim(), reason.as_str())
        }
    }
    Ok(())
}

//! General utility function for module.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::profile::ProfileKind;
use crate::registry::ProfileRegistry;

static GATEWAY_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(/v3/)[^/?#]+").expect("gateway key pattern is valid"));

/// Gateway url for `network`, e.g. `https://ropsten.infura.io/v3/{api_key}`.
pub fn gateway_endpoint(network: &str, gateway_host: &str, api_key: &str) -> String {
    format!("https://{}.{}/v3/{}", network, gateway_host, api_key)
}

/// Masks the API key segment of a gateway url.
///
/// ```text
/// https://ropsten.infura.io/v3/0123abcd -> https://ropsten.infura.io/v3/***
/// ```
///
/// Urls without a key segment are returned unchanged.
pub fn redact_endpoint(endpoint: &str) -> String {
    GATEWAY_KEY_RE.replace(endpoint, "${1}***").into_owned()
}

/// Pretty print declared network profiles.
pub fn pprint_profiles(registry: &ProfileRegistry) {
    println!("Declared network profiles: ");
    registry.iter().for_each(|p| match &p.kind {
        ProfileKind::Static(local) => {
            println!("+ {} (local)", p.name);
            println!("    + {}@{}, network_id={}", local.host, local.port, local.network_id);
        }
        ProfileKind::Deferred { remote, .. } => {
            println!("+ {} (remote)", p.name);
            println!(
                "    + {}, chain_id={}, keys={}",
                redact_endpoint(&remote.endpoint("<key>")),
                remote.chain_id,
                remote.credentials_field
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_gateway_endpoint() {
        assert_eq!(
            gateway_endpoint("kovan", "infura.io", "abc123"),
            "https://kovan.infura.io/v3/abc123"
        );
    }

    #[test]
    fn redacts_only_the_key_segment() {
        assert_eq!(
            redact_endpoint("https://rinkeby.infura.io/v3/abc123"),
            "https://rinkeby.infura.io/v3/***"
        );
        assert_eq!(redact_endpoint("http://127.0.0.1:9545"), "http://127.0.0.1:9545");
    }
}

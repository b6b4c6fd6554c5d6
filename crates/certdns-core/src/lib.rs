//! certdns-core – configuration, provider construction and certificate operations

pub mod cfg;
pub mod error;
pub mod ops;

use anyhow::Result;
use cfg::ProviderCfg;
use certdns_provider::RecordManager;
use std::sync::Arc;
use tracing::info;

pub use cfg::{AppConfig, load_config};

/// Instantiate the provider named by `kind`.
pub fn build_provider(p: &ProviderCfg) -> Result<Arc<dyn RecordManager>> {
    let prov: Arc<dyn RecordManager> = match p.kind.to_ascii_lowercase().as_str() {
        #[cfg(feature = "certdns-provider-qrator")]
        "qrator" => Arc::new(certdns_provider_qrator::QratorProvider::new(
            certdns_provider_qrator::QratorConfig::new(&p.api_token).with_api_base(&p.api_base),
        )),
        other => anyhow::bail!("unknown provider kind `{other}`"),
    };
    info!("provider `{}` ready", prov.name());
    Ok(prov)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_cfg(kind: &str) -> ProviderCfg {
        ProviderCfg {
            kind: kind.into(),
            zone: "example.com".into(),
            api_token: "t".into(),
            api_base: String::new(),
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = build_provider(&provider_cfg("route53")).err().unwrap();
        assert!(err.to_string().contains("unknown provider kind `route53`"));
    }

    #[cfg(feature = "certdns-provider-qrator")]
    #[test]
    fn qrator_kind_is_case_insensitive() {
        let prov = build_provider(&provider_cfg("Qrator")).unwrap();
        assert_eq!(prov.name(), "Qrator");
    }
}

use mplan_domain::TenantPlugin;
use mplan_tenancy::{ConfigurationInjector, ResolutionContext};
use proptest::prelude::*;
use std::collections::HashMap;

fn tenant() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-z][a-z0-9]{0,7}")
}

proptest! {
    /// The first signalling strategy wins: url, then subdomain, then env, then default.
    #[test]
    fn first_signal_wins(url in tenant(), subdomain in tenant(), env in tenant()) {
        let mut location = String::from("https://");
        if let Some(sub) = &subdomain {
            location.push_str(sub);
            location.push('.');
        }
        location.push_str("planner.app/");
        if let Some(id) = &url {
            location.push_str("?tenant=");
            location.push_str(id);
        }

        let vars: HashMap<String, String> =
            env.iter().map(|id| ("MPLAN_TENANT_ID".to_owned(), id.clone())).collect();
        let injector = ConfigurationInjector::builder()
            .plugins([TenantPlugin::new("default", "Default", "1.0.0")])
            .environment(vars)
            .build();

        let expected = url.or(subdomain).or(env).unwrap_or_else(|| "default".to_owned());
        let resolved = injector.resolve_tenant_id(&ResolutionContext::client_at(&location));
        prop_assert_eq!(resolved, expected);
    }
}

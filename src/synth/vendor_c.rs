use serde_json::Value;

use crate::derive::SecretCipher;
use crate::error::{IsisError, Result};
use crate::intent::{self, canonical_key, get, get_map, get_path, scalar_string, Intent};
use crate::models::{interface_type, InstanceService, InterfaceService, Synthesis, TemplateVariant};

use super::common::{self, PreparedInterface};
use super::dispatch::Vendor;
use super::{SynthesisContext, Synthesizer};

pub const INSTANCE_MANDATORY: &[&str] = &["area-id", "loopback0"];
pub const INTERFACE_MANDATORY: &[&str] = &["interface-type", "isis-instance-id"];

pub struct VendorC;

/// Interface identity resolved from `common-attributes`
#[derive(Debug, PartialEq, Eq)]
struct CommonAttributes {
    id: String,
    subif_id: Option<String>,
    if_type: String,
}

impl CommonAttributes {
    /// Rendered interface name, `id` or `id.subif`
    fn interface_name(&self) -> String {
        match &self.subif_id {
            Some(subif) => format!("{}.{}", self.id, subif),
            None => self.id.clone(),
        }
    }
}

/// Resolve `common-attributes` from intent, then service, then inventory.
///
/// Fields already found are never replaced by a later source.
fn common_attributes(
    ctx: &SynthesisContext<'_>,
    service: &InterfaceService,
    data: &Intent,
) -> Result<CommonAttributes> {
    let mut id = None;
    let mut subif_id = None;
    let mut if_type = None;

    let service_attrs = service.common_attributes.as_ref().map(intent::normalize);
    let inventory_attrs = ctx
        .inventory
        .get_default(&ctx.device.name, "common_attributes")
        .and_then(|v| v.as_object().map(intent::normalize));
    let sources = [
        get_map(data, "common_attributes").cloned(),
        service_attrs,
        inventory_attrs,
    ];

    for attrs in sources.iter().flatten() {
        if id.is_some() && if_type.is_some() {
            break;
        }
        id = id.or_else(|| scalar_string(get(attrs, "id")));
        if_type = if_type.or_else(|| scalar_string(get(attrs, "type")));
        subif_id = subif_id.or_else(|| scalar_string(get(attrs, "subif_id")));
    }

    match (id, if_type) {
        (Some(id), Some(if_type)) => Ok(CommonAttributes { id, subif_id, if_type }),
        (id, if_type) => {
            let mut missing = Vec::new();
            if id.is_none() {
                missing.push("common-attributes/id".to_string());
            }
            if if_type.is_none() {
                missing.push("common-attributes/type".to_string());
            }
            Err(IsisError::missing(missing, common::interface_label(ctx, service)))
        }
    }
}

/// The templates only know `level-2`.
fn normalize_circuit_type(prepared: &mut PreparedInterface) {
    if get(&prepared.data, "circuit_type").and_then(Value::as_str) == Some("level-2-only") {
        prepared
            .data
            .insert(canonical_key("circuit_type"), Value::String("level-2".into()));
    }
}

impl Synthesizer for VendorC {
    fn synthesize_instance(
        &self,
        ctx: &SynthesisContext<'_>,
        service: &InstanceService,
    ) -> Result<Synthesis> {
        let mut prepared = common::prepare_instance(ctx, service, INSTANCE_MANDATORY)?;
        if !intent::contains(&prepared.data, "is_name") {
            prepared
                .data
                .insert("is_name".into(), Value::String(ctx.device.name.clone()));
        }

        let mut table = common::instance_table(ctx, service, &prepared);
        let data = &prepared.data;

        table.add(
            "FAST_REROUTE_TI_LFA_LEVEL",
            scalar_string(get_path(data, "fast_reroute.ti_lfa_level")).unwrap_or_default(),
        );
        // this dialect's templates compare against lowercase booleans
        table.add("LDP", if common::ldp_enabled(data) { "true" } else { "false" });

        Ok(Synthesis::new(Vendor::C, TemplateVariant::Instance, table))
    }

    fn synthesize_interface(
        &self,
        ctx: &SynthesisContext<'_>,
        service: &InterfaceService,
    ) -> Result<Synthesis> {
        let mut prepared = common::prepare_interface(ctx, service, INTERFACE_MANDATORY)?;
        normalize_circuit_type(&mut prepared);

        let variant = prepared.variant();
        let common_attrs = match variant {
            TemplateVariant::Common => {
                let attrs = common_attributes(ctx, service, &prepared.data)?;
                if attrs.if_type != interface_type::LAG {
                    return Err(IsisError::UnsupportedInterfaceType {
                        interface_type: attrs.if_type,
                    });
                }
                Some(attrs)
            }
            _ => None,
        };
        let loopback = match variant {
            TemplateVariant::Loopback => {
                let attribs = common::loopback_attribs(ctx, service, &prepared.data);
                if attribs.loopback_id.is_none() {
                    return Err(IsisError::missing(
                        vec!["loopback-attribs/loopback-id".to_string()],
                        common::interface_label(ctx, service),
                    ));
                }
                Some(attribs)
            }
            _ => None,
        };

        let mut table = common::interface_table(ctx, service, &prepared);
        let passwd = prepared
            .secret
            .as_deref()
            .map(|secret| SecretCipher::merge(secret, ctx.prior_secret, ctx.salt));
        table.add_or_none("PASSWD", passwd);

        if let Some(attrs) = common_attrs {
            table.add("IF_ATTR_TYPE", attrs.if_type.as_str());
            table.add("NAME", attrs.interface_name());
        }
        if let Some(attribs) = loopback {
            table.add_or_none("LOOPBACK_ID", attribs.loopback_id);
            table.add_or_none("LOOPBACK_UNICAST_TAG", attribs.unicast_tag);
        }

        Ok(Synthesis::new(Vendor::C, variant, table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::{Salt, SaltPolicy};
    use crate::inventory::{NoInventory, StaticInventory};
    use crate::synth::test_support::{device, instance, interface, obj};
    use serde_json::json;

    fn fixed_salt() -> SaltPolicy {
        SaltPolicy::Fixed(Salt::new(1).unwrap())
    }

    #[test]
    fn test_instance_reference_scenario() {
        let dev = device("vendor-c");
        let ctx = SynthesisContext::new(&dev, &NoInventory);
        let out = VendorC
            .synthesize_instance(
                &ctx,
                &instance(json!({ "area_id": "49.0010", "loopback0": "1.23.45.167", "mpls": true })),
            )
            .unwrap();
        let vars = &out.variables;
        assert_eq!(out.template_name, "vendor-c/vendor-c-isis-instance-template");
        assert_eq!(vars.get("AREA_ID"), Some("49.0010"));
        assert_eq!(vars.get("LOOPBACK0"), Some("1.23.45.167"));
        assert_eq!(vars.get("MPLS"), Some("true"));
        assert_eq!(vars.get("NET_ID"), Some("49.0010.0010.2304.5167.00"));
        assert_eq!(vars.count("NET_ID"), 1);
        assert_eq!(vars.get("LDP"), Some("false"));
        assert_eq!(vars.get("IS_NAME"), Some("pe1"));
        assert_eq!(vars.get("FAST_REROUTE_TI_LFA_LEVEL"), Some(""));
        assert_eq!(vars.get("SR"), Some("False"));
    }

    #[test]
    fn test_instance_explicit_is_name_and_ti_lfa() {
        let dev = device("vendor-c");
        let ctx = SynthesisContext::new(&dev, &NoInventory);
        let out = VendorC
            .synthesize_instance(
                &ctx,
                &instance(json!({
                    "area_id": "49.0010",
                    "loopback0": "1.23.45.167",
                    "is-name": "core-pe1",
                    "fast-reroute": { "ti-lfa-level": "level-2" },
                    "ldp": true,
                })),
            )
            .unwrap();
        let vars = &out.variables;
        assert_eq!(vars.get("IS_NAME"), Some("core-pe1"));
        assert_eq!(vars.count("IS_NAME"), 1);
        assert_eq!(vars.get("FAST_REROUTE_TI_LFA_LEVEL"), Some("level-2"));
        assert_eq!(vars.get("LDP"), Some("true"));
    }

    #[test]
    fn test_interface_common_rejects_non_lag() {
        let dev = device("vendor-c");
        let ctx = SynthesisContext::new(&dev, &NoInventory);
        let err = VendorC
            .synthesize_interface(
                &ctx,
                &interface("GE0/0/1", "ethernet", json!({ "common_attributes": { "id": "10", "type": "GigabitEthernet" } })),
            )
            .unwrap_err();
        assert_eq!(
            err,
            IsisError::UnsupportedInterfaceType { interface_type: "GigabitEthernet".into() }
        );
    }

    #[test]
    fn test_interface_common_lag() {
        let dev = device("vendor-c");
        let ctx = SynthesisContext::new(&dev, &NoInventory).with_salt(fixed_salt());
        let mut svc = interface(
            "Eth-Trunk10",
            "lag",
            json!({
                "common-attributes": { "id": "Eth-Trunk10", "type": "LAG", "subif-id": 100 },
                "circuit-type": "level-2-only",
                "passwd": "cisc",
            }),
        );
        svc.passwd = Some("ignored".into());
        let out = VendorC.synthesize_interface(&ctx, &svc).unwrap();

        assert_eq!(out.template, TemplateVariant::Common);
        assert_eq!(out.template_name, "vendor-c/vendor-c-isis-interface-common-template");
        let vars = &out.variables;
        assert_eq!(vars.get("CIRCUIT_TYPE"), Some("level-2"));
        assert_eq!(vars.get("IF_ATTR_TYPE"), Some("LAG"));
        assert_eq!(vars.get("NAME"), Some("Eth-Trunk10.100"));
        assert_eq!(vars.get("PASSWD"), Some("01100F1758"));
        assert_eq!(vars.count("PASSWD"), 1);
    }

    #[test]
    fn test_interface_common_attributes_fallback() {
        let dev = device("vendor-c");
        let inv = StaticInventory::for_device("pe1", obj(json!({ "common-attributes": { "type": "LAG" } })));
        let ctx = SynthesisContext::new(&dev, &inv);
        let mut svc = interface("Eth-Trunk2", "lag", json!({}));
        svc.common_attributes = Some(obj(json!({ "id": "Eth-Trunk2" })));
        let out = VendorC.synthesize_interface(&ctx, &svc).unwrap();
        assert_eq!(out.variables.get("NAME"), Some("Eth-Trunk2"));
        assert_eq!(out.variables.get("IF_ATTR_TYPE"), Some("LAG"));
        assert_eq!(out.variables.get("PASSWD"), Some("None"));
    }

    #[test]
    fn test_interface_common_attributes_missing() {
        let dev = device("vendor-c");
        let ctx = SynthesisContext::new(&dev, &NoInventory);
        let err = VendorC
            .synthesize_interface(&ctx, &interface("Eth-Trunk2", "lag", json!({ "common_attributes": { "subif_id": 1 } })))
            .unwrap_err();
        assert_eq!(
            err,
            IsisError::missing(
                vec!["common-attributes/id".into(), "common-attributes/type".into()],
                "interface Eth-Trunk2 on pe1"
            )
        );
    }

    #[test]
    fn test_interface_keeps_valid_prior_secret() {
        let dev = device("vendor-c");
        let prior = SecretCipher::encode("hello", Salt::new(42).unwrap());
        let ctx = SynthesisContext::new(&dev, &NoInventory)
            .with_prior_secret(Some(prior.as_str()))
            .with_salt(fixed_salt());
        let mut svc = interface("LoopBack0", "loopback", json!({ "loopback_attribs": { "loopback_id": 0 } }));
        svc.passwd = Some("hello".into());
        let out = VendorC.synthesize_interface(&ctx, &svc).unwrap();
        assert_eq!(out.variables.get("PASSWD"), Some(prior.as_str()));

        svc.passwd = Some("changed".into());
        let out = VendorC.synthesize_interface(&ctx, &svc).unwrap();
        assert_eq!(
            out.variables.get("PASSWD").map(str::to_string),
            Some(SecretCipher::encode("changed", Salt::new(1).unwrap()))
        );
    }

    #[test]
    fn test_interface_loopback() {
        let dev = device("vendor-c");
        let ctx = SynthesisContext::new(&dev, &NoInventory);
        let out = VendorC
            .synthesize_interface(
                &ctx,
                &interface("LoopBack0", "loopback", json!({ "loopback-attribs": { "loopback-id": 0, "unicast-tag": 200 } })),
            )
            .unwrap();
        assert_eq!(out.template, TemplateVariant::Loopback);
        let vars = &out.variables;
        assert_eq!(vars.get("LOOPBACK_ID"), Some("0"));
        assert_eq!(vars.get("LOOPBACK_UNICAST_TAG"), Some("200"));
        assert!(!vars.contains("IF_ATTR_TYPE"));
    }

    #[test]
    fn test_interface_loopback_requires_id() {
        let dev = device("vendor-c");
        let ctx = SynthesisContext::new(&dev, &NoInventory);
        let err = VendorC
            .synthesize_interface(&ctx, &interface("LoopBack0", "loopback", json!({ "loopback_attribs": { "unicast_tag": 1 } })))
            .unwrap_err();
        assert_eq!(
            err,
            IsisError::missing(vec!["loopback-attribs/loopback-id".into()], "interface LoopBack0 on pe1")
        );
    }
}

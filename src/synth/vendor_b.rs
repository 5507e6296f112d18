use crate::error::Result;
use crate::intent::{get, is_truthy};
use crate::models::{InstanceService, InterfaceService, Synthesis, TemplateVariant};

use super::common;
use super::dispatch::Vendor;
use super::{SynthesisContext, Synthesizer};

pub const INSTANCE_MANDATORY: &[&str] = &["area-id", "loopback0"];
pub const INTERFACE_MANDATORY: &[&str] = &["interface-type", "isis-instance-id"];

pub struct VendorB;

impl Synthesizer for VendorB {
    fn synthesize_instance(
        &self,
        ctx: &SynthesisContext<'_>,
        service: &InstanceService,
    ) -> Result<Synthesis> {
        let prepared = common::prepare_instance(ctx, service, INSTANCE_MANDATORY)?;
        let mut table = common::instance_table(ctx, service, &prepared);
        let data = &prepared.data;

        table.add_flag("LDP", common::ldp_enabled(data));
        table.add_flag("MPLS", is_truthy(get(data, "mpls")));
        table.add_flag("MPLS_SR_PREFER", is_truthy(get(data, "mpls_sr_prefer")));
        table.add_flag("DIST_LINK_STATE", is_truthy(get(data, "dist_link_state")));

        Ok(Synthesis::new(Vendor::B, TemplateVariant::Instance, table))
    }

    fn synthesize_interface(
        &self,
        ctx: &SynthesisContext<'_>,
        service: &InterfaceService,
    ) -> Result<Synthesis> {
        let prepared = common::prepare_interface(ctx, service, INTERFACE_MANDATORY)?;
        let mut table = common::interface_table(ctx, service, &prepared);
        common::add_plain_secret(&mut table, &prepared);

        let variant = prepared.variant();
        if variant == TemplateVariant::Loopback {
            let attribs = common::loopback_attribs(ctx, service, &prepared.data);
            common::add_loopback_vars(&mut table, service, &attribs);
        }

        table.add_flag(
            "ENABLE_SYNC_LDP",
            is_truthy(get(&prepared.data, "enable_sync_ldp")),
        );

        Ok(Synthesis::new(Vendor::B, variant, table))
    }
}

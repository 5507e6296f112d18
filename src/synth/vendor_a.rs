use crate::error::Result;
use crate::intent::{get, is_truthy, scalar_string};
use crate::models::{InstanceService, InterfaceService, Synthesis, TemplateVariant};

use super::common;
use super::dispatch::Vendor;
use super::{SynthesisContext, Synthesizer};

pub const INSTANCE_MANDATORY: &[&str] = &["area-id", "loopback0"];
pub const INTERFACE_MANDATORY: &[&str] = &["interface-type", "isis-instance-id"];

pub struct VendorA;

impl Synthesizer for VendorA {
    fn synthesize_instance(
        &self,
        ctx: &SynthesisContext<'_>,
        service: &InstanceService,
    ) -> Result<Synthesis> {
        let prepared = common::prepare_instance(ctx, service, INSTANCE_MANDATORY)?;
        let mut table = common::instance_table(ctx, service, &prepared);
        let data = &prepared.data;

        table.add_flag("DISABLE_SYNC_LDP", is_truthy(get(data, "disable_sync_ldp")));
        table.add_or_none("EXPORT", scalar_string(get(data, "export")));
        table.add_or_none(
            "EXPORT_TUNNEL_TABLE",
            scalar_string(get(data, "export_tunnel_table")),
        );

        Ok(Synthesis::new(Vendor::A, TemplateVariant::Instance, table))
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

        Ok(Synthesis::new(Vendor::A, variant, table))
    }
}

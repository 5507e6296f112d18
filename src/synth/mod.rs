//! Vendor synthesizers and the dispatcher that selects one.
//!
//! Every vendor implements [`Synthesizer`]. The closed set of vendors is
//! the [`Vendor`] enum; supporting a new dialect means adding a variant and
//! its module, not registering a handler at runtime.

mod common;
mod dispatch;
pub mod vendor_a;
pub mod vendor_b;
pub mod vendor_c;

use crate::derive::SaltPolicy;
use crate::error::Result;
use crate::inventory::Inventory;
use crate::models::{DeviceContext, InstanceService, InterfaceService, Synthesis};

pub use dispatch::{dispatch, Vendor};

/// Everything a synthesizer reads besides the service itself.
///
/// All of it is plain data gathered by the caller beforehand; synthesis
/// performs no I/O.
pub struct SynthesisContext<'a> {
    pub device: &'a DeviceContext,
    pub inventory: &'a dyn Inventory,
    /// Hash previously stored for this (device, interface), if any
    pub prior_secret: Option<&'a str>,
    pub salt: SaltPolicy,
}

impl<'a> SynthesisContext<'a> {
    pub fn new(device: &'a DeviceContext, inventory: &'a dyn Inventory) -> Self {
        Self {
            device,
            inventory,
            prior_secret: None,
            salt: SaltPolicy::default(),
        }
    }

    pub fn with_prior_secret(mut self, prior: Option<&'a str>) -> Self {
        self.prior_secret = prior;
        self
    }

    pub fn with_salt(mut self, salt: SaltPolicy) -> Self {
        self.salt = salt;
        self
    }
}

/// Turns a service request into a variable table and template variant.
pub trait Synthesizer {
    fn synthesize_instance(
        &self,
        ctx: &SynthesisContext<'_>,
        service: &InstanceService,
    ) -> Result<Synthesis>;

    fn synthesize_interface(
        &self,
        ctx: &SynthesisContext<'_>,
        service: &InterfaceService,
    ) -> Result<Synthesis>;
}

/// Dispatch on the device platform and synthesize an instance.
pub fn synthesize_instance(ctx: &SynthesisContext<'_>, service: &InstanceService) -> Result<Synthesis> {
    let vendor = dispatch(&ctx.device.platform)?;
    let synthesis = vendor.synthesize_instance(ctx, service)?;
    tracing::debug!(
        "synthesized {} variables for {} ({})",
        synthesis.variables.len(),
        common::instance_label(ctx, service),
        synthesis.template_name
    );
    Ok(synthesis)
}

/// Dispatch on the device platform and synthesize an interface.
pub fn synthesize_interface(ctx: &SynthesisContext<'_>, service: &InterfaceService) -> Result<Synthesis> {
    let vendor = dispatch(&ctx.device.platform)?;
    let synthesis = vendor.synthesize_interface(ctx, service)?;
    tracing::debug!(
        "synthesized {} variables for {} ({})",
        synthesis.variables.len(),
        common::interface_label(ctx, service),
        synthesis.template_name
    );
    Ok(synthesis)
}

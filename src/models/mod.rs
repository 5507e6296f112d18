mod variables;

use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::intent::Intent;
use crate::synth::Vendor;

pub use variables::{Variable, VariableTable};

/// The device a service instance is configured on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceContext {
    pub name: String,
    /// Platform identifier, e.g. `vendor-a`
    pub platform: String,
}

/// IS-IS instance service request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceService {
    pub instance_id: String,
    #[serde(default)]
    pub intent: Intent,
}

/// IS-IS interface service request.
///
/// The optional leaves are set on the service itself and are inherited by
/// the intent when it does not carry them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterfaceService {
    pub name: String,
    #[serde(default, alias = "interface-type")]
    pub interface_type: Option<String>,
    #[serde(default, alias = "isis-instance-id")]
    pub isis_instance_id: Option<String>,
    #[serde(default, skip_serializing)]
    pub passwd: Option<String>,
    #[serde(default, alias = "loopback-attribs")]
    pub loopback_attribs: Option<Intent>,
    #[serde(default, alias = "common-attributes")]
    pub common_attributes: Option<Intent>,
    #[serde(default)]
    pub intent: Intent,
}

/// Canonical interface type values
pub mod interface_type {
    pub const LOOPBACK: &str = "loopback";
    pub const LAG: &str = "LAG";
}

/// Rendering path selected by a synthesizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateVariant {
    Instance,
    Loopback,
    Common,
}

impl TemplateVariant {
    /// Interface variant for a resolved interface type
    pub fn for_interface(interface_type: &str) -> Self {
        if interface_type == interface_type::LOOPBACK {
            Self::Loopback
        } else {
            Self::Common
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instance => "instance",
            Self::Loopback => "loopback",
            Self::Common => "common",
        }
    }

    /// Full template name for a platform,
    /// e.g. `vendor-c/vendor-c-isis-interface-loopback-template`
    pub fn template_name(&self, platform: &str) -> String {
        match self {
            Self::Instance => format!("{platform}/{platform}-isis-instance-template"),
            other => format!(
                "{platform}/{platform}-isis-interface-{}-template",
                other.as_str()
            ),
        }
    }
}

/// Output of one synthesis call
#[derive(Debug, Clone, Serialize)]
pub struct Synthesis {
    pub vendor: Vendor,
    pub template: TemplateVariant,
    pub template_name: String,
    pub variables: VariableTable,
}

impl Synthesis {
    pub fn new(vendor: Vendor, template: TemplateVariant, variables: VariableTable) -> Self {
        Self {
            vendor,
            template,
            template_name: template.template_name(vendor.platform()),
            variables,
        }
    }
}

/// Request body for instance synthesis
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceSynthesisRequest {
    pub device: DeviceContext,
    pub service: InstanceService,
    /// Inventory defaults for the device
    #[serde(default)]
    pub inventory: Map<String, serde_json::Value>,
}

/// Request body for interface synthesis
#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceSynthesisRequest {
    pub device: DeviceContext,
    pub service: InterfaceService,
    #[serde(default)]
    pub inventory: Map<String, serde_json::Value>,
}

/// RenderResponse returned by the render endpoints
#[derive(Debug, Clone, Serialize)]
pub struct RenderResponse {
    pub template_name: String,
    pub output: String,
}

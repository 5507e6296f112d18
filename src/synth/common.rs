//! Steps shared by every vendor synthesizer.

use serde_json::Value;

use crate::derive::compute_net_id;
use crate::error::Result;
use crate::flatten::flatten_to_table;
use crate::intent::{self, canonical_key, get, get_map, scalar_string, Intent};
use crate::models::{InstanceService, InterfaceService, TemplateVariant, VariableTable};
use crate::validate::validate;

use super::SynthesisContext;

/// Instance fields an inventory may supply when the intent leaves them out.
const INSTANCE_INHERITED: &[&str] = &["area-id", "loopback0", "net-id"];

/// Intent key carrying the interface secret; never flattened.
const SECRET_FIELD: &str = "passwd";

/// Normalized instance intent, ready for flattening.
pub struct PreparedInstance {
    pub data: Intent,
    pub net_id: Option<String>,
}

/// Normalized interface intent with its resolved identifiers.
pub struct PreparedInterface {
    pub data: Intent,
    pub interface_type: String,
    pub instance_id: String,
    pub secret: Option<String>,
}

impl PreparedInterface {
    pub fn variant(&self) -> TemplateVariant {
        TemplateVariant::for_interface(&self.interface_type)
    }
}

pub fn instance_label(ctx: &SynthesisContext<'_>, service: &InstanceService) -> String {
    format!("instance {} on {}", service.instance_id, ctx.device.name)
}

pub fn interface_label(ctx: &SynthesisContext<'_>, service: &InterfaceService) -> String {
    format!("interface {} on {}", service.name, ctx.device.name)
}

/// Insert `field` into `data` from the first fallback that has a value.
///
/// Only absent (or null) fields are filled; an explicit intent value, even
/// an empty one, is left for validation to judge.
fn inherit<I>(data: &mut Intent, field: &str, fallbacks: I)
where
    I: IntoIterator<Item = Option<Value>>,
{
    if get(data, field).is_some() {
        return;
    }
    let value = fallbacks
        .into_iter()
        .flatten()
        .find(|v| !v.is_null() && v.as_str() != Some(""));
    if let Some(value) = value {
        tracing::debug!("{} inherited from service/inventory", field);
        data.insert(canonical_key(field), value);
    }
}

/// Normalize, default from inventory, validate and derive the NET.
pub fn prepare_instance(
    ctx: &SynthesisContext<'_>,
    service: &InstanceService,
    mandatory: &[&str],
) -> Result<PreparedInstance> {
    let mut data = intent::normalize(&service.intent);
    for field in INSTANCE_INHERITED {
        let default = ctx.inventory.get_default(&ctx.device.name, field);
        inherit(&mut data, field, [default]);
    }

    validate(&data, mandatory, &instance_label(ctx, service))?;

    let net_id = if intent::contains(&data, "net_id") {
        None
    } else {
        match (
            scalar_string(get(&data, "loopback0")),
            scalar_string(get(&data, "area_id")),
        ) {
            (Some(loopback), Some(area_id)) => Some(compute_net_id(&loopback, &area_id)?),
            _ => None,
        }
    };

    Ok(PreparedInstance { data, net_id })
}

/// Common instance variables, the flattened intent and the derived NET.
pub fn instance_table(
    ctx: &SynthesisContext<'_>,
    service: &InstanceService,
    prepared: &PreparedInstance,
) -> VariableTable {
    let mut table = VariableTable::new();
    table.add("DEVICE", ctx.device.name.as_str());
    table.add("INSTANCE_ID", service.instance_id.as_str());

    flatten_to_table(&mut table, &prepared.data, "");
    if let Some(net_id) = &prepared.net_id {
        table.add("NET_ID", net_id.as_str());
    }
    add_sr_vars(&mut table, &prepared.data);
    table
}

/// Segment-routing block, emitted for every vendor.
pub fn add_sr_vars(table: &mut VariableTable, data: &Intent) {
    let sr = get_map(data, "sr");
    table.add_flag("SR", intent::is_truthy(get(data, "sr")));
    table.add(
        "SR_LOWER_BOUND",
        sr.and_then(|sr| scalar_string(get(sr, "lower_bound")))
            .unwrap_or_default(),
    );
    table.add(
        "SR_UPPER_BOUND",
        sr.and_then(|sr| scalar_string(get(sr, "upper_bound")))
            .unwrap_or_default(),
    );
}

/// LDP counts as enabled for `ldp: true` or any nested `ldp` block.
pub fn ldp_enabled(data: &Intent) -> bool {
    matches!(get(data, "ldp"), Some(Value::Object(_)) | Some(Value::Bool(true)))
}

/// Normalize, inherit type and instance id from the service, validate.
pub fn prepare_interface(
    ctx: &SynthesisContext<'_>,
    service: &InterfaceService,
    mandatory: &[&str],
) -> Result<PreparedInterface> {
    let mut data = intent::normalize(&service.intent);
    let device = ctx.device.name.as_str();

    inherit(
        &mut data,
        "interface_type",
        [
            service.interface_type.clone().map(Value::String),
            ctx.inventory.get_default(device, "interface_type"),
        ],
    );
    inherit(
        &mut data,
        "isis_instance_id",
        [
            service.isis_instance_id.clone().map(Value::String),
            ctx.inventory.get_default(device, "isis_instance_id"),
        ],
    );

    validate(&data, mandatory, &interface_label(ctx, service))?;

    let interface_type = scalar_string(get(&data, "interface_type")).unwrap_or_default();
    let instance_id = scalar_string(get(&data, "isis_instance_id")).unwrap_or_default();
    let secret = scalar_string(get(&data, SECRET_FIELD)).or_else(|| {
        service
            .passwd
            .clone()
            .filter(|s| !s.is_empty())
    });
    data.remove(SECRET_FIELD);

    Ok(PreparedInterface {
        data,
        interface_type,
        instance_id,
        secret,
    })
}

/// Common interface variables followed by the flattened intent.
pub fn interface_table(
    ctx: &SynthesisContext<'_>,
    service: &InterfaceService,
    prepared: &PreparedInterface,
) -> VariableTable {
    let mut table = VariableTable::new();
    table.add("DEVICE", ctx.device.name.as_str());
    table.add("INTERFACE_NAME", service.name.as_str());
    table.add("INTERFACE_TYPE", prepared.interface_type.as_str());
    table.add("INSTANCE_ID", prepared.instance_id.as_str());

    flatten_to_table(&mut table, &prepared.data, "");
    table
}

/// Resolved `loopback-attribs` block
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoopbackAttribs {
    pub sr_id: Option<String>,
    pub loopback_id: Option<String>,
    pub unicast_tag: Option<String>,
}

impl LoopbackAttribs {
    fn from_map(map: &Intent) -> Self {
        let map = intent::normalize(map);
        Self {
            sr_id: scalar_string(get(&map, "sr_id")),
            loopback_id: scalar_string(get(&map, "loopback_id")),
            unicast_tag: scalar_string(get(&map, "unicast_tag")),
        }
    }

    fn is_empty(&self) -> bool {
        self.sr_id.is_none() && self.loopback_id.is_none() && self.unicast_tag.is_none()
    }
}

/// Loopback attributes from the intent, else the service, else inventory.
pub fn loopback_attribs(
    ctx: &SynthesisContext<'_>,
    service: &InterfaceService,
    data: &Intent,
) -> LoopbackAttribs {
    let from_intent = get_map(data, "loopback_attribs")
        .map(LoopbackAttribs::from_map)
        .unwrap_or_default();
    if !from_intent.is_empty() {
        return from_intent;
    }

    let from_service = service
        .loopback_attribs
        .as_ref()
        .map(LoopbackAttribs::from_map)
        .unwrap_or_default();
    if !from_service.is_empty() {
        return from_service;
    }

    ctx.inventory
        .get_default(&ctx.device.name, "loopback_attribs")
        .and_then(|v| v.as_object().map(LoopbackAttribs::from_map))
        .unwrap_or_default()
}

/// `NAME` plus the loopback attributes, `"None"` where absent.
pub fn add_loopback_vars(
    table: &mut VariableTable,
    service: &InterfaceService,
    attribs: &LoopbackAttribs,
) {
    table.add("NAME", service.name.as_str());
    table.add_or_none("LOOPBACK_SR_ID", attribs.sr_id.clone());
    table.add_or_none("LOOPBACK_ID", attribs.loopback_id.clone());
    table.add_or_none("LOOPBACK_UNICAST_TAG", attribs.unicast_tag.clone());
}

/// Secret to emit as `PASSWD`: verbatim, or `"None"` when unset.
pub fn add_plain_secret(table: &mut VariableTable, prepared: &PreparedInterface) {
    table.add_or_none("PASSWD", prepared.secret.clone());
}

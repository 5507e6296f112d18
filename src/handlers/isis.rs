use axum::{extract::State, Json};
use std::sync::Arc;

use crate::inventory::StaticInventory;
use crate::models::*;
use crate::synth::{self, SynthesisContext, Vendor};
use crate::AppState;

use super::ApiError;

/// List supported platform identifiers
pub async fn list_platforms() -> Json<Vec<&'static str>> {
    Json(Vendor::ALL.iter().map(Vendor::platform).collect())
}

fn instance_synthesis(
    state: &AppState,
    req: InstanceSynthesisRequest,
) -> Result<Synthesis, ApiError> {
    let inventory = StaticInventory::for_device(&req.device.name, req.inventory);
    let ctx = SynthesisContext::new(&req.device, &inventory).with_salt(state.config.secret_salt);
    Ok(synth::synthesize_instance(&ctx, &req.service)?)
}

fn interface_synthesis(
    state: &AppState,
    req: InterfaceSynthesisRequest,
) -> Result<Synthesis, ApiError> {
    let device = &req.device;
    let service = &req.service;
    let inventory = StaticInventory::for_device(&device.name, req.inventory.clone());
    let prior = state.secrets.get(&device.name, &service.name);

    let ctx = SynthesisContext::new(device, &inventory)
        .with_prior_secret(prior.as_deref())
        .with_salt(state.config.secret_salt);
    let synthesis = synth::synthesize_interface(&ctx, service)?;

    // only the encoded form is worth remembering
    if synthesis.vendor == Vendor::C {
        match synthesis.variables.get("PASSWD") {
            Some(hash) if hash != "None" => {
                state.secrets.put(&device.name, &service.name, hash.to_string());
            }
            _ => {
                state.secrets.remove(&device.name, &service.name);
            }
        }
    }
    Ok(synthesis)
}

fn render(state: &AppState, synthesis: &Synthesis) -> Result<RenderResponse, ApiError> {
    let renderer = state
        .renderer
        .as_ref()
        .ok_or_else(|| ApiError::unavailable("no templates loaded"))?;
    let output = renderer
        .render(synthesis)
        .map_err(|e| ApiError::bad_request(format!("{:#}", e)))?;
    Ok(RenderResponse {
        template_name: synthesis.template_name.clone(),
        output,
    })
}

/// Synthesize the variable table for an IS-IS instance
pub async fn synthesize_instance(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InstanceSynthesisRequest>,
) -> Result<Json<Synthesis>, ApiError> {
    Ok(Json(instance_synthesis(&state, req)?))
}

/// Synthesize the variable table for an IS-IS interface
pub async fn synthesize_interface(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InterfaceSynthesisRequest>,
) -> Result<Json<Synthesis>, ApiError> {
    Ok(Json(interface_synthesis(&state, req)?))
}

/// Synthesize and render an IS-IS instance
pub async fn render_instance(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InstanceSynthesisRequest>,
) -> Result<Json<RenderResponse>, ApiError> {
    let synthesis = instance_synthesis(&state, req)?;
    Ok(Json(render(&state, &synthesis)?))
}

/// Synthesize and render an IS-IS interface
pub async fn render_interface(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InterfaceSynthesisRequest>,
) -> Result<Json<RenderResponse>, ApiError> {
    let synthesis = interface_synthesis(&state, req)?;
    Ok(Json(render(&state, &synthesis)?))
}

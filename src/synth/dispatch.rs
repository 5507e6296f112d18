use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{IsisError, Result};
use crate::models::{InstanceService, InterfaceService, Synthesis};

use super::vendor_a::VendorA;
use super::vendor_b::VendorB;
use super::vendor_c::VendorC;
use super::{SynthesisContext, Synthesizer};

/// Supported router dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    A,
    B,
    C,
}

impl Vendor {
    pub const ALL: [Vendor; 3] = [Vendor::A, Vendor::B, Vendor::C];

    /// Platform identifier, also the template directory name
    pub fn platform(&self) -> &'static str {
        match self {
            Self::A => "vendor-a",
            Self::B => "vendor-b",
            Self::C => "vendor-c",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.platform())
    }
}

impl Serialize for Vendor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.platform())
    }
}

impl FromStr for Vendor {
    type Err = IsisError;

    fn from_str(s: &str) -> Result<Self> {
        Vendor::ALL
            .into_iter()
            .find(|v| v.platform().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| IsisError::UnsupportedPlatform {
                platform: s.to_string(),
            })
    }
}

/// Select the synthesizer for a platform identifier.
pub fn dispatch(platform: &str) -> Result<Vendor> {
    platform.parse()
}

impl Synthesizer for Vendor {
    fn synthesize_instance(
        &self,
        ctx: &SynthesisContext<'_>,
        service: &InstanceService,
    ) -> Result<Synthesis> {
        match self {
            Self::A => VendorA.synthesize_instance(ctx, service),
            Self::B => VendorB.synthesize_instance(ctx, service),
            Self::C => VendorC.synthesize_instance(ctx, service),
        }
    }

    fn synthesize_interface(
        &self,
        ctx: &SynthesisContext<'_>,
        service: &InterfaceService,
    ) -> Result<Synthesis> {
        match self {
            Self::A => VendorA.synthesize_interface(ctx, service),
            Self::B => VendorB.synthesize_interface(ctx, service),
            Self::C => VendorC.synthesize_interface(ctx, service),
        }
    }
}

//! Pure derivation functions used by the vendor synthesizers.

pub mod net_id;
pub mod secret;

pub use net_id::compute_net_id;
pub use secret::{Salt, SaltPolicy, SecretCipher};

use thiserror::Error;

/// Errors surfaced by the synthesis engine.
///
/// Every variant is fatal for the service instance being synthesized. The
/// only place an error is recovered internally is the secret merge, which
/// treats a malformed prior hash as "no prior hash".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsisError {
    #[error("{} must be configured for ISIS {instance}", .fields.join(", "))]
    MissingField { fields: Vec<String>, instance: String },

    #[error("platform {platform} not supported for ISIS")]
    UnsupportedPlatform { platform: String },

    #[error("interface type {interface_type} not supported, only LAG interfaces can be configured")]
    UnsupportedInterfaceType { interface_type: String },

    #[error("invalid IPv4 address: {address}")]
    InvalidAddress { address: String },

    #[error("malformed secret hash: {reason}")]
    MalformedSecret { reason: String },
}

impl IsisError {
    pub fn missing(fields: Vec<String>, instance: impl Into<String>) -> Self {
        Self::MissingField {
            fields,
            instance: instance.into(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedSecret {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IsisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_names_every_field() {
        let err = IsisError::missing(
            vec!["area-id".to_string(), "loopback0".to_string()],
            "instance 1",
        );
        assert_eq!(
            err.to_string(),
            "area-id, loopback0 must be configured for ISIS instance 1"
        );
    }
}

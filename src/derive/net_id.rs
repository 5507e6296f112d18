use crate::error::{IsisError, Result};

/// Derive an IS-IS NET from a loopback address and area id.
///
/// Each octet is zero-padded to three digits, the twelve digits are
/// regrouped in fours and wrapped with the area id and a `00` selector:
/// `1.23.45.167` in area `49.0010` gives `49.0010.0010.2304.5167.00`.
pub fn compute_net_id(ipv4: &str, area_id: &str) -> Result<String> {
    let octets: Vec<&str> = ipv4.split('.').collect();
    if octets.len() != 4 || !octets.iter().all(|o| is_octet(o)) {
        return Err(IsisError::InvalidAddress {
            address: ipv4.to_string(),
        });
    }

    let digits: String = octets.iter().map(|o| format!("{:0>3}", o)).collect();
    Ok(format!(
        "{}.{}.{}.{}.00",
        area_id,
        &digits[0..4],
        &digits[4..8],
        &digits[8..12]
    ))
}

// `u8::from_str` alone accepts a leading `+`
fn is_octet(part: &str) -> bool {
    !part.is_empty()
        && part.len() <= 3
        && part.bytes().all(|b| b.is_ascii_digit())
        && part.parse::<u8>().is_ok()
}

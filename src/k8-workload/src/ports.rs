use k8_roles::ExposedPort;

use crate::ExportError;

/// Longest port name Kubernetes accepts (IANA service name limit).
const MAX_PORT_NAME: usize = 15;

/// One concrete port after range expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PortPair {
    pub name: String,
    pub protocol: String,
    pub external: u16,
    pub internal: u16,
}

/// Expands an exposed-port declaration into concrete ports.
///
/// `external` and `internal` may each be a single port or an inclusive
/// `lo-hi` range, and both sides must yield the same number of ports.
/// Ports expanded from a range are suffixed `-0`, `-1`, … to keep their
/// names unique.
pub(crate) fn expand(role: &str, port: &ExposedPort) -> Result<Vec<PortPair>, ExportError> {
    check_name(role, &port.name)?;

    let external = parse_range(role, port, port.external.as_str())?;
    let internal = parse_range(role, port, port.internal.as_str())?;
    if external.len() != internal.len() {
        return Err(ExportError::InvalidPortRange {
            role: role.to_owned(),
            name: port.name.clone(),
            range: format!("{}:{}", port.external, port.internal),
            reason: "external and internal port counts differ",
        });
    }

    // a declared range keeps its numeric suffix even when it spans a
    // single port
    let ranged = port.external.is_range() || port.internal.is_range();
    let mut pairs = Vec::with_capacity(external.len());
    for (index, (external, internal)) in external.into_iter().zip(internal).enumerate() {
        let name = if ranged {
            format!("{}-{}", port.name, index)
        } else {
            port.name.clone()
        };
        if name.len() > MAX_PORT_NAME {
            return Err(ExportError::InvalidPortName {
                role: role.to_owned(),
                name,
                reason: "port names are limited to 15 characters",
            });
        }
        pairs.push(PortPair {
            name,
            protocol: port.protocol.clone(),
            external,
            internal,
        });
    }
    Ok(pairs)
}

fn check_name(role: &str, name: &str) -> Result<(), ExportError> {
    let invalid = |reason: &'static str| ExportError::InvalidPortName {
        role: role.to_owned(),
        name: name.to_owned(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("port name is empty"));
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    {
        return Err(invalid(
            "port names use lowercase letters, digits, and dashes",
        ));
    }
    Ok(())
}

fn parse_range(role: &str, port: &ExposedPort, range: &str) -> Result<Vec<u16>, ExportError> {
    let invalid = |reason: &'static str| ExportError::InvalidPortRange {
        role: role.to_owned(),
        name: port.name.clone(),
        range: range.to_owned(),
        reason,
    };

    let (low, high) = match range.split_once('-') {
        Some((low, high)) => (low, high),
        None => (range, range),
    };
    let low: u16 = low.trim().parse().map_err(|_| invalid("not a port number"))?;
    let high: u16 = high.trim().parse().map_err(|_| invalid("not a port number"))?;
    if low == 0 || high < low {
        return Err(invalid("ports fall in 1-65535, low end first"));
    }
    Ok((low..=high).collect())
}

//! Domain name splitting
//!
//! Porkbun addresses records by (registrable domain, type, subdomain), so a
//! fully-qualified name has to be cut into those two parts first.
//!
//! The split is purely textual: the last two labels form the registrable
//! domain. There is no public-suffix list, so `host.example.co.uk` becomes
//! `co.uk` + `host.example`. Multi-label suffixes are not supported.

use std::fmt;

/// A domain reference cut into the parts the provider API wants
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainParts {
    /// Last two labels, e.g. `example.com`
    pub registrable_domain: String,
    /// Every label before the registrable domain, e.g. `a.b`; may be empty
    pub subdomain: String,
}

impl DomainParts {
    /// Rebuild the fully-qualified name
    pub fn fqdn(&self) -> String {
        if self.has_subdomain() {
            format!("{}.{}", self.subdomain, self.registrable_domain)
        } else {
            self.registrable_domain.clone()
        }
    }

    /// Whether a subdomain is present
    pub fn has_subdomain(&self) -> bool {
        !self.subdomain.is_empty()
    }
}

impl fmt::Display for DomainParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fqdn())
    }
}

/// Split a dotted name into registrable domain and subdomain
///
/// Inputs with fewer than two labels are not rejected: whatever is present
/// becomes the registrable domain and the subdomain is empty.
///
/// ```
/// use ddns_core::domain::split_domain;
///
/// let parts = split_domain("a.b.example.com");
/// assert_eq!(parts.registrable_domain, "example.com");
/// assert_eq!(parts.subdomain, "a.b");
/// ```
pub fn split_domain(domain: &str) -> DomainParts {
    let labels: Vec<&str> = domain.split('.').collect();
    let cut = labels.len().saturating_sub(2);
    let (sub, root) = labels.split_at(cut);

    DomainParts {
        registrable_domain: root.join("."),
        subdomain: sub.join("."),
    }
}

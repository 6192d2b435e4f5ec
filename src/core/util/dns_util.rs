use std::sync::LazyLock;

use regex::Regex;

pub const DNS1123_LABEL_MAX_LENGTH: usize = 63;
pub const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;

static DNS1123_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("static DNS-1123 label pattern")
});

/// Object names and label-like values used in metadata.
pub fn is_dns1123_label(value: &str) -> bool {
    !value.is_empty() && value.len() <= DNS1123_LABEL_MAX_LENGTH && DNS1123_LABEL.is_match(value)
}

/// Hostnames: dot-separated DNS-1123 labels.
pub fn is_dns1123_subdomain(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= DNS1123_SUBDOMAIN_MAX_LENGTH
        && value.split('.').all(is_dns1123_label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_labels() {
        for ok in ["nextcloud", "nextcloud-svc", "a", "0abc", "app-1-data"] {
            assert!(is_dns1123_label(ok), "{ok:?}");
        }
    }

    #[test]
    fn rejects_invalid_labels() {
        for bad in ["", "Nextcloud", "-app", "app-", "app_data", "app.data", "app data"] {
            assert!(!is_dns1123_label(bad), "{bad:?}");
        }
        assert!(!is_dns1123_label(&"a".repeat(64)));
        assert!(is_dns1123_label(&"a".repeat(63)));
    }

    #[test]
    fn validates_hostnames() {
        assert!(is_dns1123_subdomain("nextcloud.kube.home"));
        assert!(is_dns1123_subdomain("localhost"));
        assert!(!is_dns1123_subdomain("nextcloud..home"));
        assert!(!is_dns1123_subdomain(".kube.home"));
        assert!(!is_dns1123_subdomain("Nextcloud.kube.home"));
        assert!(!is_dns1123_subdomain("*.kube.home"));
    }
}

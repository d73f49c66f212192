//! Presentation capability detection

use tracing::debug;

/// What kind of presentation the current session can host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCapability {
    TrayCapable,
    CliOnly,
}

/// Decide once, at startup, whether an indicator can be shown
pub fn detect_capability() -> DisplayCapability {
    let capability = capability_from_env(
        std::env::var_os("DISPLAY").as_deref(),
        std::env::var_os("WAYLAND_DISPLAY").as_deref(),
    );
    debug!("Display capability: {:?}", capability);
    capability
}

fn capability_from_env(
    x11: Option<&std::ffi::OsStr>,
    wayland: Option<&std::ffi::OsStr>,
) -> DisplayCapability {
    let present = |v: Option<&std::ffi::OsStr>| v.is_some_and(|s| !s.is_empty());
    if present(x11) || present(wayland) {
        DisplayCapability::TrayCapable
    } else {
        DisplayCapability::CliOnly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_no_display_is_cli_only() {
        assert_eq!(capability_from_env(None, None), DisplayCapability::CliOnly);
        assert_eq!(
            capability_from_env(Some(OsStr::new("")), None),
            DisplayCapability::CliOnly
        );
    }

    #[test]
    fn test_x11_or_wayland_is_tray_capable() {
        assert_eq!(
            capability_from_env(Some(OsStr::new(":0")), None),
            DisplayCapability::TrayCapable
        );
        assert_eq!(
            capability_from_env(None, Some(OsStr::new("wayland-0"))),
            DisplayCapability::TrayCapable
        );
    }
}

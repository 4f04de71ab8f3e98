//! Desktop environment check.

use crate::error::StartupError;

/// Desktops whose tray hosts cannot drive a dbusmenu reliably.
const UNSUPPORTED: &[(&str, &str)] = &[("cinnamon", "Cinnamon")];

/// Rejects desktops named in `XDG_CURRENT_DESKTOP` that cannot host the menu.
pub fn ensure_supported(current_desktop: Option<&str>) -> Result<(), StartupError> {
    let Some(desktop) = current_desktop else {
        return Ok(());
    };
    let desktop = desktop.to_lowercase();

    for (needle, name) in UNSUPPORTED {
        if desktop.contains(needle) {
            return Err(StartupError::UnsupportedDesktop(name));
        }
    }
    Ok(())
}

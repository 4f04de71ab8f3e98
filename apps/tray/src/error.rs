//! Fatal startup errors.

use linkhub_backend::BackendError;
use linkhub_sni::SniError;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(
        "{0} is not supported.\n\n\
         Due to incomplete support for modern tray menus (StatusNotifierItem),\n\
         this application cannot run reliably on {0}.\n\n\
         Please use KDE Plasma, GNOME, XFCE, or another supported desktop."
    )]
    UnsupportedDesktop(&'static str),

    #[error("invalid backend address: {0}")]
    InvalidAddress(String),

    #[error(transparent)]
    Bus(#[from] SniError),

    #[error("backend client: {0}")]
    Backend(#[from] BackendError),
}

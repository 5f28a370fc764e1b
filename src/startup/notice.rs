use serde::Serialize;

use crate::services::permissions::AuthorizationKind;

/// User-visible, non-blocking message shown at a startup transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "notice", rename_all = "kebab-case")]
pub enum Notice {
    OverlayPermissionNeeded,
    MutePermissionNeeded,
    AuthorizationDenied { kind: AuthorizationKind },
    PermissionsDenied,
    InsufficientStorage { quota_mb: u64 },
}

impl Notice {
    /// Instructions shown when the authorization surface is opened for `kind`.
    pub fn on_request(kind: AuthorizationKind) -> Option<Notice> {
        match kind {
            AuthorizationKind::OverlayDraw => Some(Notice::OverlayPermissionNeeded),
            AuthorizationKind::MuteSystemSound => Some(Notice::MutePermissionNeeded),
            // The system permission dialog explains itself
            AuthorizationKind::RuntimeBundle => None,
        }
    }

    /// Explanation shown before exiting on a denial of `kind`.
    pub fn on_denial(kind: AuthorizationKind) -> Notice {
        match kind {
            AuthorizationKind::RuntimeBundle => Notice::PermissionsDenied,
            kind => Notice::AuthorizationDenied { kind },
        }
    }

    /// Display text, one toast per line.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Notice::OverlayPermissionNeeded => vec![
                "Draw over apps permission needed".to_string(),
                "Allow and click \"Back\"".to_string(),
                "Then restart the Open Dash Cam app".to_string(),
            ],
            Notice::MutePermissionNeeded => vec![
                "Do Not Disturb access needed to mute system sounds while recording".to_string(),
            ],
            Notice::AuthorizationDenied { kind } => vec![format!(
                "{} permission denied. The app cannot start.",
                match kind {
                    AuthorizationKind::OverlayDraw => "Draw over apps",
                    AuthorizationKind::MuteSystemSound => "Do Not Disturb",
                    AuthorizationKind::RuntimeBundle => "Camera, microphone and storage",
                }
            )],
            Notice::PermissionsDenied => vec![
                "Permissions denied. The app cannot start.".to_string(),
                "Please re-start Open Dash Cam app and grant the requested permissions."
                    .to_string(),
            ],
            Notice::InsufficientStorage { quota_mb } => vec![format!(
                "Not enough storage to run the app (Need {}MB). Clean up space for recordings.",
                quota_mb
            )],
        }
    }
}

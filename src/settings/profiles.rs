//! The two shipped target profiles: chat client and chat server.
//!
//! Both share one pipeline shape; everything that differs between them is
//! data in the returned [`BuildTarget`].

use super::{BuildTarget, DataDir, UiMode};
use std::path::Path;

/// Entry script the version declaration is scanned from.
const CLIENT_ENTRY: &str = "qt_chat_client.py";
const SERVER_ENTRY: &str = "chat_server.py";

/// Optional local configuration file shipped with the client when present.
const LOCAL_CONFIG: &str = "chat_config.json";

/// Profile for the interactive Qt chat client.
///
/// Windowed UI, Qt widget stack force-included (PyInstaller's import
/// analysis misses the shiboken shim and the pyobjc bridges used for
/// notifications and native UI integration), icon and theme assets bundled,
/// plus the local config file when the checkout carries one.
pub fn client(project_root: &Path) -> BuildTarget {
    let mut data_dirs = vec![
        DataDir::new(project_root.join("assets/icons"), "assets/icons"),
        DataDir::new(project_root.join("assets/themes"), "assets/themes"),
    ];

    let config = project_root.join(LOCAL_CONFIG);
    if config.exists() {
        data_dirs.push(DataDir::new(config, LOCAL_CONFIG));
    }

    BuildTarget {
        name: "IntranetChat".to_string(),
        entry_script: project_root.join(CLIENT_ENTRY),
        icon_source: project_root.join("assets/icons/client.png"),
        data_dirs,
        ui_mode: UiMode::Windowed,
        bundle_identifier: Some("com.intranet.chat.client".to_string()),
        hidden_imports: vec![
            "PySide6.QtCore".to_string(),
            "PySide6.QtGui".to_string(),
            "PySide6.QtWidgets".to_string(),
            "shiboken6".to_string(),
            "Foundation".to_string(),
            "AppKit".to_string(),
            "UserNotifications".to_string(),
        ],
        version_source: Some(project_root.join(CLIENT_ENTRY)),
        required_packages: vec![
            "pyinstaller".to_string(),
            "PySide6".to_string(),
            "pyobjc".to_string(),
        ],
    }
}

/// Profile for the headless chat server.
///
/// Ships as a double-clickable bundle but runs as a background agent: the
/// Dock-suppression flag is injected after assembly, so the only
/// force-included module is the native-integration bridge. Icon assets are
/// the sole bundled data set.
pub fn server(project_root: &Path) -> BuildTarget {
    BuildTarget {
        name: "IntranetChatServer".to_string(),
        entry_script: project_root.join(SERVER_ENTRY),
        icon_source: project_root.join("assets/icons/server.png"),
        data_dirs: vec![DataDir::new(
            project_root.join("assets/icons"),
            "assets/icons",
        )],
        ui_mode: UiMode::BackgroundAgent,
        bundle_identifier: Some("com.intranet.chat.server".to_string()),
        hidden_imports: vec!["AppKit".to_string()],
        version_source: Some(project_root.join(CLIENT_ENTRY)),
        required_packages: vec!["pyinstaller".to_string(), "pyobjc".to_string()],
    }
}

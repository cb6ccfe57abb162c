use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use directories::{BaseDirs, UserDirs};
use walkdir::WalkDir;

use crate::config::Config;
use crate::index_store::{Catalog, CatalogBuilder};
use crate::model::{FileKind, IndexedApp, IndexedFile};

/// Lowercased name fragments that mark a shortcut as noise rather than an app.
pub const APP_EXCLUDED_TOKENS: [&str; 3] = ["uninstall", "readme", "help"];

#[cfg(target_os = "windows")]
pub const APP_EXTENSIONS: [&str; 2] = ["lnk", "exe"];
#[cfg(not(target_os = "windows"))]
pub const APP_EXTENSIONS: [&str; 2] = ["desktop", "appimage"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ProviderError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEntry {
    App(IndexedApp),
    File(IndexedFile),
}

pub trait DiscoveryProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;
    fn discover(&self) -> Result<Vec<CatalogEntry>, ProviderError>;
}

pub struct BuiltInAppProvider {
    apps: Vec<IndexedApp>,
}

impl BuiltInAppProvider {
    pub fn from_apps(apps: Vec<IndexedApp>) -> Self {
        Self { apps }
    }
}

impl Default for BuiltInAppProvider {
    fn default() -> Self {
        Self::from_apps(
            built_in_apps()
                .iter()
                .map(|(name, path)| IndexedApp::new(name, path))
                .collect(),
        )
    }
}

impl DiscoveryProvider for BuiltInAppProvider {
    fn provider_name(&self) -> &'static str {
        "builtin"
    }

    fn discover(&self) -> Result<Vec<CatalogEntry>, ProviderError> {
        Ok(self.apps.iter().cloned().map(CatalogEntry::App).collect())
    }
}

#[cfg(target_os = "windows")]
pub fn built_in_apps() -> &'static [(&'static str, &'static str)] {
    &[
        ("Notepad", "notepad.exe"),
        ("Calculator", "calc.exe"),
        ("Command Prompt", "cmd.exe"),
        ("PowerShell", "powershell.exe"),
        ("Task Manager", "taskmgr.exe"),
        ("File Explorer", "explorer.exe"),
        ("Settings", "ms-settings:"),
        ("Control Panel", "control.exe"),
    ]
}

#[cfg(not(target_os = "windows"))]
pub fn built_in_apps() -> &'static [(&'static str, &'static str)] {
    &[
        ("Terminal", "x-terminal-emulator"),
        ("Files", "xdg-open"),
        ("System Monitor", "gnome-system-monitor"),
        ("Settings", "gnome-control-center"),
    ]
}

/// Walks start-menu style roots for shortcut and executable files.
pub struct StartMenuAppDiscoveryProvider {
    roots: Vec<PathBuf>,
    max_depth: usize,
}

impl StartMenuAppDiscoveryProvider {
    /// `max_depth` bounds the directory recursion counter: the root is level
    /// 0 and directories down to level `max_depth` are listed.
    pub fn new(roots: Vec<PathBuf>, max_depth: usize) -> Self {
        Self { roots, max_depth }
    }

    fn scan_root(&self, root: &Path) -> Result<Vec<IndexedApp>, ProviderError> {
        ensure_directory(root)?;

        let mut apps = Vec::new();
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(self.max_depth + 1)
            .sort_by_file_name();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    log::debug!("skipping unreadable entry under {}: {error}", root.display());
                    continue;
                }
            };
            if !entry.path().is_file() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };
            let Some(name) = app_display_name(file_name) else {
                continue;
            };
            apps.push(IndexedApp {
                name,
                path: entry.path().to_string_lossy().into_owned(),
            });
        }
        Ok(apps)
    }
}

impl Default for StartMenuAppDiscoveryProvider {
    fn default() -> Self {
        Self::new(default_app_roots(), Config::default().app_scan_depth)
    }
}

impl DiscoveryProvider for StartMenuAppDiscoveryProvider {
    fn provider_name(&self) -> &'static str {
        "start_menu"
    }

    fn discover(&self) -> Result<Vec<CatalogEntry>, ProviderError> {
        let mut out = Vec::new();
        for root in &self.roots {
            match self.scan_root(root) {
                Ok(apps) => out.extend(apps.into_iter().map(CatalogEntry::App)),
                Err(error) => log::debug!("skipping app root {}: {error}", root.display()),
            }
        }
        Ok(out)
    }
}

/// Lists the immediate children of common user folders.
pub struct CommonFolderDiscoveryProvider {
    roots: Vec<PathBuf>,
}

impl CommonFolderDiscoveryProvider {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    fn scan_root(root: &Path) -> Result<Vec<IndexedFile>, ProviderError> {
        ensure_directory(root)?;
        let read_dir = std::fs::read_dir(root)
            .map_err(|e| ProviderError::new(format!("failed to list {}: {e}", root.display())))?;

        let mut files = Vec::new();
        for entry in read_dir.filter_map(|entry| entry.ok()) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            files.push(IndexedFile {
                name,
                path: entry.path().to_string_lossy().into_owned(),
                kind: if is_dir { FileKind::Folder } else { FileKind::File },
            });
        }
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }
}

impl Default for CommonFolderDiscoveryProvider {
    fn default() -> Self {
        Self::new(default_file_roots())
    }
}

impl DiscoveryProvider for CommonFolderDiscoveryProvider {
    fn provider_name(&self) -> &'static str {
        "common_folders"
    }

    fn discover(&self) -> Result<Vec<CatalogEntry>, ProviderError> {
        let mut out = Vec::new();
        for root in &self.roots {
            match Self::scan_root(root) {
                Ok(files) => out.extend(files.into_iter().map(CatalogEntry::File)),
                Err(error) => log::debug!("skipping file root {}: {error}", root.display()),
            }
        }
        Ok(out)
    }
}

/// Runs providers in order and folds their entries into one catalog.
/// A failing provider contributes nothing; it never aborts the build.
pub struct Indexer {
    providers: Vec<Box<dyn DiscoveryProvider>>,
}

impl Indexer {
    pub fn with_providers(providers: Vec<Box<dyn DiscoveryProvider>>) -> Self {
        Self { providers }
    }

    /// Built-ins first so they win name conflicts, then app roots, then
    /// common folders.
    pub fn from_config(cfg: &Config) -> Self {
        let app_roots = cfg.app_roots.clone().unwrap_or_else(default_app_roots);
        let file_roots = cfg.file_roots.clone().unwrap_or_else(default_file_roots);
        Self::with_providers(vec![
            Box::new(BuiltInAppProvider::default()),
            Box::new(StartMenuAppDiscoveryProvider::new(app_roots, cfg.app_scan_depth)),
            Box::new(CommonFolderDiscoveryProvider::new(file_roots)),
        ])
    }

    pub fn build(&self) -> Catalog {
        let mut builder = CatalogBuilder::new();
        for provider in &self.providers {
            let entries = match provider.discover() {
                Ok(entries) => entries,
                Err(error) => {
                    log::warn!("provider {} failed: {error}", provider.provider_name());
                    continue;
                }
            };

            let mut apps = 0_usize;
            let mut files = 0_usize;
            for entry in entries {
                match entry {
                    CatalogEntry::App(app) => {
                        if builder.insert_app(app) {
                            apps += 1;
                        }
                    }
                    CatalogEntry::File(file) => {
                        builder.insert_file(file);
                        files += 1;
                    }
                }
            }
            log::debug!(
                "provider {} contributed apps={apps} files={files}",
                provider.provider_name()
            );
        }
        builder.finish()
    }
}

/// Strips a launch extension from `file_name`, rejecting other files and
/// excluded names.
pub fn app_display_name(file_name: &str) -> Option<String> {
    let (stem, extension) = file_name.rsplit_once('.')?;
    if stem.is_empty()
        || !APP_EXTENSIONS
            .iter()
            .any(|ext| extension.eq_ignore_ascii_case(ext))
    {
        return None;
    }

    let lowered = stem.to_lowercase();
    if APP_EXCLUDED_TOKENS
        .iter()
        .any(|token| lowered.contains(token))
    {
        return None;
    }
    Some(stem.to_string())
}

fn ensure_directory(root: &Path) -> Result<(), ProviderError> {
    let meta = std::fs::metadata(root)
        .map_err(|e| ProviderError::new(format!("cannot read {}: {e}", root.display())))?;
    if !meta.is_dir() {
        return Err(ProviderError::new(format!(
            "not a directory: {}",
            root.display()
        )));
    }
    Ok(())
}

#[cfg(target_os = "windows")]
pub fn default_app_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(base) = BaseDirs::new() {
        roots.push(
            base.config_dir()
                .join("Microsoft")
                .join("Windows")
                .join("Start Menu")
                .join("Programs"),
        );
    }
    let program_data =
        std::env::var_os("ProgramData").unwrap_or_else(|| "C:\\ProgramData".into());
    roots.push(
        PathBuf::from(program_data)
            .join("Microsoft")
            .join("Windows")
            .join("Start Menu")
            .join("Programs"),
    );
    roots.extend(desktop_dir());
    roots
}

#[cfg(not(target_os = "windows"))]
pub fn default_app_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(base) = BaseDirs::new() {
        roots.push(base.data_dir().join("applications"));
    }
    roots.push(PathBuf::from("/usr/share/applications"));
    roots.push(PathBuf::from("/usr/local/share/applications"));
    roots.extend(desktop_dir());
    roots
}

pub fn default_file_roots() -> Vec<PathBuf> {
    let Some(user) = UserDirs::new() else {
        return Vec::new();
    };
    let home = user.home_dir();
    vec![
        user.desktop_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| home.join("Desktop")),
        user.document_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| home.join("Documents")),
        user.download_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| home.join("Downloads")),
    ]
}

fn desktop_dir() -> Option<PathBuf> {
    let user = UserDirs::new()?;
    Some(
        user.desktop_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| user.home_dir().join("Desktop")),
    )
}

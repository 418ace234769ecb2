//! Mock collaborators shared by the launcher integration tests.
#![allow(dead_code)]

use fastlaunch_application::LaunchContext;
use fastlaunch_core::config::{AppConfig, RunMode};
use fastlaunch_core::cookie::{Cookie, CookieJar, CookieStore, LOGIN_SECURE_ID};
use fastlaunch_core::dgp::{
    DgpApi, DgpConfig, DgpSessionFactory, DownloadProgress, DownloadStream, LaunchData,
    LaunchResponse, ProductDetail, ProductEntry,
};
use fastlaunch_core::error::{LaunchError, Result};
use fastlaunch_core::event::LaunchEvent;
use fastlaunch_core::process::{CommandSpec, OutputLines, ProcessRunner};
use fastlaunch_core::shortcut::{LauncherShortcutData, ShortcutData, ShortcutRepository};
use fastlaunch_infrastructure::FastLaunchPaths;
use futures::StreamExt;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::sync::mpsc::{self, UnboundedReceiver};

pub const PRODUCT_ID: &str = "abc";
pub const ACCOUNT: &str = "main";

// ============================================================================
// Shortcuts
// ============================================================================

#[derive(Default)]
pub struct MockShortcuts {
    shortcuts: Mutex<HashMap<String, ShortcutData>>,
    launcher_shortcuts: Mutex<HashMap<String, LauncherShortcutData>>,
}

impl ShortcutRepository for MockShortcuts {
    fn load_shortcut(&self, id: &str) -> Result<ShortcutData> {
        self.shortcuts
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| LaunchError::not_found("shortcut", id))
    }

    fn load_launcher_shortcut(&self, id: &str) -> Result<LauncherShortcutData> {
        self.launcher_shortcuts
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| LaunchError::not_found("shortcut", id))
    }

    fn save_shortcut(&self, id: &str, data: &ShortcutData) -> Result<()> {
        self.shortcuts
            .lock()
            .unwrap()
            .insert(id.to_string(), data.clone());
        Ok(())
    }

    fn save_launcher_shortcut(&self, id: &str, data: &LauncherShortcutData) -> Result<()> {
        self.launcher_shortcuts
            .lock()
            .unwrap()
            .insert(id.to_string(), data.clone());
        Ok(())
    }
}

// ============================================================================
// Cookies
// ============================================================================

#[derive(Default)]
pub struct MockCookieStore {
    blobs: Mutex<HashMap<PathBuf, CookieJar>>,
    current: Mutex<Option<CookieJar>>,
    blob_writes: Mutex<usize>,
}

impl MockCookieStore {
    pub fn insert_blob(&self, path: PathBuf, jar: CookieJar) {
        self.blobs.lock().unwrap().insert(path, jar);
    }

    pub fn blob(&self, path: &Path) -> Option<CookieJar> {
        self.blobs.lock().unwrap().get(path).cloned()
    }

    pub fn blob_writes(&self) -> usize {
        *self.blob_writes.lock().unwrap()
    }

    pub fn current(&self) -> Option<CookieJar> {
        self.current.lock().unwrap().clone()
    }

    pub fn set_current(&self, jar: CookieJar) {
        *self.current.lock().unwrap() = Some(jar);
    }
}

impl CookieStore for MockCookieStore {
    fn read_bytes(&self, path: &Path) -> Result<CookieJar> {
        self.blob(path)
            .ok_or_else(|| LaunchError::not_found("account", path.display().to_string()))
    }

    fn write_bytes(&self, path: &Path, jar: &CookieJar) -> Result<()> {
        *self.blob_writes.lock().unwrap() += 1;
        self.insert_blob(path.to_path_buf(), jar.clone());
        Ok(())
    }

    fn read_current(&self) -> Result<CookieJar> {
        self.current()
            .ok_or_else(|| LaunchError::not_found("session", "current"))
    }

    fn write_current(&self, jar: &CookieJar) -> Result<()> {
        self.set_current(jar.clone());
        Ok(())
    }
}

pub fn logged_in_jar(value: &str) -> CookieJar {
    let mut jar = CookieJar::new();
    jar.set(Cookie::new(LOGIN_SECURE_ID, value).with_domain(".dmm.com"));
    jar.set(Cookie::new("age_check_done", "1").with_domain(".dmm.com"));
    jar
}

pub fn logged_out_jar() -> CookieJar {
    let mut jar = CookieJar::new();
    jar.set(Cookie::new("age_check_done", "1").with_domain(".dmm.com"));
    jar
}

// ============================================================================
// Launch API
// ============================================================================

pub struct MockApi {
    config: Mutex<DgpConfig>,
    response: LaunchResponse,
    update_files: Vec<String>,
    pub launch_calls: Mutex<Vec<(String, String)>>,
    pub saved_configs: Mutex<Vec<DgpConfig>>,
    pub download_calls: Mutex<Vec<(String, PathBuf)>>,
}

impl MockApi {
    pub fn new(config: DgpConfig, response: LaunchResponse) -> Self {
        Self {
            config: Mutex::new(config),
            response,
            update_files: vec!["game.exe".into(), "data/a.pak".into()],
            launch_calls: Mutex::new(Vec::new()),
            saved_configs: Mutex::new(Vec::new()),
            download_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn launch_count(&self) -> usize {
        self.launch_calls.lock().unwrap().len()
    }

    pub fn saved(&self) -> Vec<DgpConfig> {
        self.saved_configs.lock().unwrap().clone()
    }

    pub fn downloads(&self) -> Vec<(String, PathBuf)> {
        self.download_calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DgpApi for MockApi {
    async fn get_config(&self) -> Result<DgpConfig> {
        Ok(self.config.lock().unwrap().clone())
    }

    async fn set_config(&self, config: &DgpConfig) -> Result<()> {
        self.saved_configs.lock().unwrap().push(config.clone());
        *self.config.lock().unwrap() = config.clone();
        Ok(())
    }

    async fn launch(&self, product_id: &str, game_type: &str) -> Result<LaunchResponse> {
        self.launch_calls
            .lock()
            .unwrap()
            .push((product_id.to_string(), game_type.to_string()));
        Ok(self.response.clone())
    }

    fn download<'a>(&'a self, url: &'a str, dest: &'a Path) -> DownloadStream<'a> {
        self.download_calls
            .lock()
            .unwrap()
            .push((url.to_string(), dest.to_path_buf()));
        let total = self.update_files.len();
        let steps: Vec<Result<DownloadProgress>> = self
            .update_files
            .iter()
            .enumerate()
            .map(|(index, file)| {
                Ok(DownloadProgress {
                    fraction: (index + 1) as f64 / total as f64,
                    file: file.clone(),
                })
            })
            .collect();
        futures::stream::iter(steps).boxed()
    }
}

pub struct MockSessionFactory {
    api: Arc<MockApi>,
    pub opened_with: Mutex<Vec<CookieJar>>,
}

impl MockSessionFactory {
    pub fn new(api: Arc<MockApi>) -> Self {
        Self {
            api,
            opened_with: Mutex::new(Vec::new()),
        }
    }
}

impl DgpSessionFactory for MockSessionFactory {
    fn open(&self, jar: CookieJar) -> Result<Arc<dyn DgpApi>> {
        self.opened_with.lock().unwrap().push(jar);
        Ok(self.api.clone())
    }
}

pub fn product_config(install_dir: &Path, version: &str) -> DgpConfig {
    DgpConfig {
        contents: vec![ProductEntry {
            product_id: PRODUCT_ID.to_string(),
            game_type: "GCL".to_string(),
            detail: ProductDetail {
                path: install_dir.display().to_string(),
                version: version.to_string(),
                extra: Default::default(),
            },
            extra: Default::default(),
        }],
        extra: Default::default(),
    }
}

pub fn ok_response(latest_version: &str, drm_auth_token: Option<&str>) -> LaunchResponse {
    LaunchResponse {
        result_code: 100,
        error: None,
        data: Some(LaunchData {
            drm_auth_token: drm_auth_token.map(str::to_string),
            is_administrator: false,
            exec_file_name: "game.exe".to_string(),
            latest_version: latest_version.to_string(),
            execute_args: "/viewer_id=1 /open_id=2".to_string(),
            file_list_url: Some("https://example.com/filelist".to_string()),
        }),
    }
}

// ============================================================================
// Processes
// ============================================================================

type RunHook = Box<dyn FnOnce() + Send>;

pub struct MockProcessRunner {
    elevated: bool,
    output: Vec<Vec<u8>>,
    specs: Mutex<Vec<CommandSpec>>,
    on_run: Mutex<Option<RunHook>>,
}

impl MockProcessRunner {
    pub fn new(elevated: bool) -> Self {
        Self {
            elevated,
            output: vec![b"starting\r\n".to_vec(), b"\x83\x65\x83\x58\x83\x67\n".to_vec()],
            specs: Mutex::new(Vec::new()),
            on_run: Mutex::new(None),
        }
    }

    /// Runs `hook` when the process is spawned, standing in for whatever the
    /// child does while it runs.
    pub fn on_run(&self, hook: impl FnOnce() + Send + 'static) {
        *self.on_run.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn specs(&self) -> Vec<CommandSpec> {
        self.specs.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ProcessRunner for MockProcessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<OutputLines> {
        self.specs.lock().unwrap().push(spec.clone());
        let hook = self.on_run.lock().unwrap().take();
        if let Some(hook) = hook {
            hook();
        }
        let lines: Vec<std::io::Result<Vec<u8>>> = self.output.iter().cloned().map(Ok).collect();
        Ok(futures::stream::iter(lines).boxed())
    }

    fn is_elevated(&self) -> bool {
        self.elevated
    }
}

// ============================================================================
// Harness
// ============================================================================

pub struct Harness {
    pub temp_dir: TempDir,
    pub shortcuts: Arc<MockShortcuts>,
    pub cookies: Arc<MockCookieStore>,
    pub api: Arc<MockApi>,
    pub sessions: Arc<MockSessionFactory>,
    pub processes: Arc<MockProcessRunner>,
    pub ctx: LaunchContext,
    pub events: UnboundedReceiver<LaunchEvent>,
}

impl Harness {
    /// Builds a harness whose API serves `product_config` for the install
    /// dir `<temp>/games/abc` at `installed_version`.
    pub fn new(mode: RunMode, installed_version: &str, response: LaunchResponse) -> Self {
        Self::with_elevation(mode, installed_version, response, false)
    }

    pub fn with_elevation(
        mode: RunMode,
        installed_version: &str,
        response: LaunchResponse,
        elevated: bool,
    ) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let install_dir = temp_dir.path().join("games").join(PRODUCT_ID);
        let api = Arc::new(MockApi::new(
            product_config(&install_dir, installed_version),
            response,
        ));
        Self::with_api(temp_dir, mode, api, elevated)
    }

    pub fn with_api(temp_dir: TempDir, mode: RunMode, api: Arc<MockApi>, elevated: bool) -> Self {
        let shortcuts = Arc::new(MockShortcuts::default());
        let cookies = Arc::new(MockCookieStore::default());
        let sessions = Arc::new(MockSessionFactory::new(api.clone()));
        let processes = Arc::new(MockProcessRunner::new(elevated));
        let (tx, rx) = mpsc::unbounded_channel();

        let config = AppConfig {
            dmm_game_player_program_folder: temp_dir.path().join("dgp"),
            dmm_game_player_hidden_folder: temp_dir.path().join("drm"),
            ..AppConfig::default()
        };

        let ctx = LaunchContext {
            shortcuts: shortcuts.clone(),
            cookies: cookies.clone(),
            sessions: sessions.clone(),
            processes: processes.clone(),
            paths: FastLaunchPaths::new(Some(temp_dir.path())),
            config,
            mode,
            events: tx,
        };

        Self {
            temp_dir,
            shortcuts,
            cookies,
            api,
            sessions,
            processes,
            ctx,
            events: rx,
        }
    }

    pub fn install_dir(&self) -> PathBuf {
        self.temp_dir.path().join("games").join(PRODUCT_ID)
    }

    pub fn account_file(&self) -> PathBuf {
        self.ctx.paths.account_file(ACCOUNT).unwrap()
    }

    pub fn hidden_folder(&self) -> PathBuf {
        self.ctx.config.dmm_game_player_hidden_folder.clone()
    }

    /// Registers shortcut `s1` for [`PRODUCT_ID`] and a logged-in account blob.
    pub fn add_game_shortcut(&self, product_id: &str, game_args: &str, auto_update: bool) {
        self.shortcuts
            .save_shortcut(
                "s1",
                &ShortcutData {
                    product_id: product_id.to_string(),
                    account_path: ACCOUNT.to_string(),
                    game_args: game_args.to_string(),
                    auto_update,
                },
            )
            .unwrap();
        self.cookies
            .insert_blob(self.account_file(), logged_in_jar("stored"));
    }

    /// Registers delegated shortcut `c1` with the given account blob.
    pub fn add_client_shortcut(&self, dgp_args: &str, account_jar: CookieJar) {
        self.shortcuts
            .save_launcher_shortcut(
                "c1",
                &LauncherShortcutData {
                    account_path: ACCOUNT.to_string(),
                    dgp_args: dgp_args.to_string(),
                },
            )
            .unwrap();
        self.cookies.insert_blob(self.account_file(), account_jar);
    }

    pub fn drain_events(&mut self) -> Vec<LaunchEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

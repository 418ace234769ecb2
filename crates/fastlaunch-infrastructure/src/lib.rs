pub mod config_service;
pub mod cookie_store;
pub mod dgp_session;
pub mod drm;
pub mod paths;
pub mod process_manager;
pub mod shortcut_repository;

pub use crate::config_service::ConfigService;
pub use crate::cookie_store::FileCookieStore;
pub use crate::dgp_session::{DgpSession, ReqwestSessionFactory};
pub use crate::paths::FastLaunchPaths;
pub use crate::process_manager::TokioProcessRunner;
pub use crate::shortcut_repository::JsonShortcutRepository;

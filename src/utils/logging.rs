use tracing::{debug, error, info, warn};

pub struct Logger;

impl Logger {
    pub fn init() {
        tracing_subscriber::fmt()
            .with_env_filter("packconf=debug")
            .with_target(false)
            .init();
    }

    pub fn session_start(root: &str, mode: &str) {
        info!("🧩 packconf session started");
        info!("📁 Root: {}", root);
        info!("🎯 Mode: {}", mode);
    }

    pub fn default_applied(category: &str) {
        debug!("✅ Applied default category: {}", category);
    }

    pub fn discarded_input(operation: &str, reason: &str) {
        debug!("🚫 {} discarded input: {}", operation, reason);
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }

    pub fn info(msg: &str) {
        info!("{}", msg);
    }

    pub fn warn(msg: &str) {
        warn!("⚠️  {}", msg);
    }

    pub fn error(msg: &str) {
        error!("❌ {}", msg);
    }
}

use std::{future::Future, sync::Arc};

use anyhow::Context;

use shelf_db::{Db, DbModule};
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Registry with the `db` core module and every project module
pub fn build_registry(db: &Db, settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    registry.register_core(Arc::new(DbModule::new(db.clone())));
    modules::register_all(&mut registry, db, settings);
    registry
}

/// Connect, initialize modules, serve until a shutdown signal, then stop modules.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let db = shelf_db::connect(&settings.database)
        .await
        .context("failed to create database client")?;

    let registry = build_registry(&db, &settings);
    run_registry(&registry, &settings, shelf_http::shutdown_signal()).await
}

/// Drive `registry` through init, start and serve, then stop every module.
///
/// Modules are stopped whichever phase failed. The first error wins.
pub async fn run_registry<F>(
    registry: &ModuleRegistry,
    settings: &Settings,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let ctx = InitCtx { settings };

    let served = async {
        registry.init_all(&ctx).await?;
        registry.start_all(&ctx).await?;

        tracing::info!(
            modules = registry.modules().len(),
            "shelf-app bootstrap complete"
        );

        shelf_http::start_server(registry, settings, shutdown).await
    }
    .await;

    let stopped = registry.stop_all().await;
    if let Err(e) = &stopped {
        tracing::error!(error = ?e, "failed to stop modules");
    }

    served?;
    stopped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Journal(Mutex<Vec<&'static str>>);

    impl Journal {
        fn push(&self, entry: &'static str) {
            self.0.lock().unwrap().push(entry);
        }

        fn entries(&self) -> Vec<&'static str> {
            self.0.lock().unwrap().clone()
        }
    }

    struct Recorder(Arc<Journal>);

    #[async_trait::async_trait]
    impl shelf_kernel::Module for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
            self.0.push("init");
            Ok(())
        }

        async fn stop(&self) -> anyhow::Result<()> {
            self.0.push("stop");
            Ok(())
        }
    }

    struct BrokenInit;

    #[async_trait::async_trait]
    impl shelf_kernel::Module for BrokenInit {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
            anyhow::bail!("store unreachable")
        }
    }

    fn ephemeral_settings() -> Settings {
        let mut settings = Settings::default();
        settings.server.host = "127.0.0.1".to_string();
        settings.server.port = 0;
        settings
    }

    #[tokio::test]
    async fn modules_are_stopped_when_init_fails() {
        let journal = Arc::new(Journal::default());
        let mut registry = ModuleRegistry::new();
        registry.register_custom(Arc::new(Recorder(journal.clone())));
        registry.register_custom(Arc::new(BrokenInit));

        let err = run_registry(&registry, &ephemeral_settings(), async {})
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("store unreachable"));
        assert_eq!(journal.entries(), vec!["init", "stop"]);
    }

    #[tokio::test]
    async fn modules_are_stopped_after_shutdown() {
        let journal = Arc::new(Journal::default());
        let mut registry = ModuleRegistry::new();
        registry.register_custom(Arc::new(Recorder(journal.clone())));

        run_registry(&registry, &ephemeral_settings(), async {})
            .await
            .unwrap();

        assert_eq!(journal.entries(), vec!["init", "stop"]);
    }
}

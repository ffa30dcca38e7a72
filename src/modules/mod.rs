pub mod books;

use std::sync::Arc;

use shelf_db::Db;
use shelf_kernel::{settings::Settings, ModuleRegistry};

use books::store::MongoBookStore;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, db: &Db, settings: &Settings) {
    let store = MongoBookStore::new(db, &settings.database.collection);
    registry.register_custom(books::create_module(Arc::new(store)));
}

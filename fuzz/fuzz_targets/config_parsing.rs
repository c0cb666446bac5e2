#![no_main]

use libfuzzer_sys::fuzz_target;
use ferrous_sm::{ServiceManager, ServiceManagerConfig, TypeCatalog};
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Arbitrary documents must parse or fail cleanly, never panic
    let Ok(config) = ServiceManagerConfig::from_json(text) else {
        return;
    };

    let ids: Vec<String> = config
        .services
        .keys()
        .chain(config.factories.keys())
        .chain(config.aliases.keys())
        .chain(config.invokables.iter())
        .cloned()
        .collect();

    if let Ok(manager) = ServiceManager::from_config(Arc::new(TypeCatalog::new()), config) {
        for id in &ids {
            let has = manager.has(id);
            let resolved = manager.get(id);
            // Anything resolvable must have been reported
            if resolved.is_ok() {
                assert!(has);
            }
        }
    }
});

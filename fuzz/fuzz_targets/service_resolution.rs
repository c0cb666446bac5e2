#![no_main]

use libfuzzer_sys::fuzz_target;
use ferrous_sm::{DynamicFactory, ReflectionFactory, ServiceManager, TypeCatalog, Value};
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let pattern = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let id = String::from_utf8_lossy(&data[4..]).into_owned();

    let mut manager = ServiceManager::new(Arc::new(TypeCatalog::new()));
    if pattern & 1 != 0 {
        manager.add_service(id.clone(), Value::from(pattern as i64));
    }
    if pattern & 2 != 0 {
        manager.add_factory_fn(format!("{}-made", id), |_c, service, _o| Ok(Value::from(service)));
    }
    if pattern & 4 != 0 {
        manager.add_alias(format!("{}-alias", id), id.clone());
    }
    if pattern & 8 != 0 {
        let _ = manager.add_abstract_factory(ReflectionFactory::NAME);
        let _ = manager.add_abstract_factory(DynamicFactory::NAME);
    }

    for candidate in [id.clone(), format!("{}-made", id), format!("{}-alias", id)] {
        let has = manager.has(&candidate);
        match manager.get(&candidate) {
            Ok(first) => {
                assert!(has);
                // Shared resolution is stable
                assert_eq!(manager.get(&candidate).unwrap(), first);
            }
            Err(error) => {
                assert!(error.to_string().contains(candidate.as_str()));
            }
        }
    }

    if pattern & 16 != 0 {
        manager.remove_service(&id);
        assert!(!manager.has(&id) || pattern & 8 != 0);
    }
});

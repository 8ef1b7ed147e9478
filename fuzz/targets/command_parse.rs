#![no_main]

use libfuzzer_sys::fuzz_target;
use ordix::{Command, CommandExecute, EngineKind, IndexEngine, Settings};

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    // Разбор не должен паниковать, а выполненная команда не должна ломать индекс.
    let Ok(command) = Command::parse(line) else {
        return;
    };
    for engine in [EngineKind::SkipList, EngineKind::RbTree] {
        let mut index = IndexEngine::initialize(&Settings {
            engine,
            seed: Some(7),
            ..Default::default()
        });
        let _ = command.execute(&mut index);
        assert!(index.check().is_ok());
    }
});

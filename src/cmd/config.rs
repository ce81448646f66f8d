use std::sync::OnceLock;

use config::Config;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct MsgrConfig {
    /// base url of the key-directory service
    pub server: String,

    /// prime search worker threads
    pub threads: usize,

    /// Miller-Rabin witness rounds
    pub test_rounds: usize,
}

impl Default for MsgrConfig {
    fn default() -> Self {
        Self {
            server: "http://kayrun.cs.rit.edu:5000".to_string(),
            threads: (num_cpus::get() * 2).max(1),
            test_rounds: 10,
        }
    }
}

impl MsgrConfig {
    pub fn config() -> &'static Self {
        static CONFIG: OnceLock<MsgrConfig> = OnceLock::new();

        CONFIG.get_or_init(|| {
            let default_config = Config::try_from(&MsgrConfig::default()).unwrap();

            let config = Config::builder()
                .add_source(default_config)
                .add_source(
                    config::Environment::with_prefix("MSGR")
                        .try_parsing(true)
                        .separator("__"),
                )
                .build()
                .unwrap();

            let mut cfg: MsgrConfig = config.try_deserialize().unwrap();
            cfg.threads = cfg.threads.max(1);
            cfg.test_rounds = cfg.test_rounds.max(1);

            log::trace!("{:?}", cfg);
            cfg
        })
    }
}

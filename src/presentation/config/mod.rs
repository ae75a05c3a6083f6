mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DatabaseProvider, DatabaseSettings, IngestionSettings, LoggingSettings, ServerSettings,
    Settings, StorageProviderSetting, StorageSettings,
};

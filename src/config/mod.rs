mod settings;

use config::{Config, ConfigError, Environment, File};

use settings::PartialSettings;

pub use settings::{RelaySettings, ServerSettings, Settings};

/// Loads the configuration from the optional `config/default` file and from
/// `POLLCAST_*` environment variables (`__` separates nested keys, e.g.
/// `POLLCAST_SERVER__PORT`), then merges it over the default values.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix("POLLCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;
    let partial: PartialSettings = config.try_deserialize()?;

    Ok(Settings::merged(partial))
}

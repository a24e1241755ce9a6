use std::fmt;

use crate::config::{ApiConfig, UrlSource, default_api_url};

pub struct SettingsView<'a> {
    pub config: &'a ApiConfig,
}

impl fmt::Display for SettingsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origin = match self.config.source {
            UrlSource::CommandLine => "ligne de commande",
            UrlSource::Saved => "personnalisée",
            UrlSource::Default => "par défaut",
        };
        writeln!(f, "Configuration API")?;
        writeln!(f, "  URL par défaut : {}", default_api_url())?;
        writeln!(f, "  URL actuelle   : {} ({origin})", self.config.base_url)
    }
}

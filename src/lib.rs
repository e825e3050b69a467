//! Globetrotter library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod source;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Where the country catalog comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    #[value(name = "restcountries")]
    RestCountries,
    File,
}

impl SourceKind {
    /// Name used in config files and `GLOBETROTTER_SOURCE`.
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::RestCountries => "restcountries",
            SourceKind::File => "file",
        }
    }
}

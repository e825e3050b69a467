pub mod file;
pub mod restcountries;

pub use file::FileSource;
pub use restcountries::RestCountriesSource;

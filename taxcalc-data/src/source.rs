use std::fs;
use std::path::{Path, PathBuf};

use taxcalc_core::{ScheduleError, ScheduleRegistry, ScheduleSource, TaxSchedule};
use tracing::{debug, info, warn};

use crate::loader::{ScheduleCsv, ScheduleLoadError, ScheduleLoader};

/// Rate data compiled into the binary, one entry per shipped tax year.
const BUNDLED: &[(i32, ScheduleCsv<'static>)] = &[(
    2026,
    ScheduleCsv {
        brackets: include_str!("../data/2026/brackets.csv"),
        indirect_rates: include_str!("../data/2026/indirect_rates.csv"),
        corporate_rates: include_str!("../data/2026/corporate_rates.csv"),
        tax_year_config: include_str!("../data/2026/tax_year_config.csv"),
    },
)];

/// A [`ScheduleSource`] over the CSV data compiled into this crate.
///
/// ```
/// use taxcalc_core::ScheduleRegistry;
/// use taxcalc_data::BundledSource;
///
/// let mut registry = ScheduleRegistry::new();
/// for source in BundledSource::all() {
///     registry.load_from(&source).unwrap();
/// }
/// assert!(registry.available_years().contains(&2026));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BundledSource {
    tax_year: i32,
    csv: ScheduleCsv<'static>,
}

impl BundledSource {
    /// The bundled data for `tax_year`, if that year ships with the crate.
    pub fn for_year(tax_year: i32) -> Option<Self> {
        BUNDLED
            .iter()
            .find(|(year, _)| *year == tax_year)
            .map(|&(tax_year, csv)| Self { tax_year, csv })
    }

    /// Every bundled year, ascending.
    pub fn all() -> Vec<Self> {
        BUNDLED
            .iter()
            .map(|&(tax_year, csv)| Self { tax_year, csv })
            .collect()
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }
}

impl ScheduleSource for BundledSource {
    fn describe(&self) -> String {
        format!("bundled {}", self.tax_year)
    }

    fn load(&self) -> Result<TaxSchedule, ScheduleError> {
        Ok(ScheduleLoader::load(self.tax_year, &self.csv)?)
    }
}

/// A [`ScheduleSource`] reading `<root>/<tax_year>/*.csv` from disk.
///
/// The directory uses the same four file names as the bundled data, so a
/// copy of this crate's `data/` directory is a valid root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySource {
    root: PathBuf,
    tax_year: i32,
}

impl DirectorySource {
    pub fn new(
        root: impl Into<PathBuf>,
        tax_year: i32,
    ) -> Self {
        Self {
            root: root.into(),
            tax_year,
        }
    }

    /// One source per sub-directory of `root` whose name is a year,
    /// ascending. Other entries are skipped.
    pub fn discover(root: &Path) -> Result<Vec<Self>, ScheduleLoadError> {
        let io_err = |source| ScheduleLoadError::Io {
            path: root.to_path_buf(),
            source,
        };

        let mut sources = Vec::new();
        for entry in fs::read_dir(root).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if !entry.file_type().map_err(io_err)?.is_dir() {
                continue;
            }
            match entry.file_name().to_str().and_then(|name| name.parse::<i32>().ok()) {
                Some(tax_year) => sources.push(Self::new(root, tax_year)),
                None => debug!(path = %entry.path().display(), "skipping non-year entry"),
            }
        }
        sources.sort_by_key(|source| source.tax_year);
        Ok(sources)
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    pub fn year_dir(&self) -> PathBuf {
        self.root.join(self.tax_year.to_string())
    }

    fn read(
        &self,
        file: &str,
    ) -> Result<String, ScheduleLoadError> {
        let path = self.year_dir().join(file);
        fs::read_to_string(&path).map_err(|source| ScheduleLoadError::Io { path, source })
    }

    fn load_csv(&self) -> Result<TaxSchedule, ScheduleLoadError> {
        let brackets = self.read(ScheduleCsv::BRACKETS_FILE)?;
        let indirect_rates = self.read(ScheduleCsv::INDIRECT_RATES_FILE)?;
        let corporate_rates = self.read(ScheduleCsv::CORPORATE_RATES_FILE)?;
        let tax_year_config = self.read(ScheduleCsv::TAX_YEAR_CONFIG_FILE)?;

        ScheduleLoader::load(
            self.tax_year,
            &ScheduleCsv {
                brackets: &brackets,
                indirect_rates: &indirect_rates,
                corporate_rates: &corporate_rates,
                tax_year_config: &tax_year_config,
            },
        )
    }
}

impl ScheduleSource for DirectorySource {
    fn describe(&self) -> String {
        self.year_dir().display().to_string()
    }

    fn load(&self) -> Result<TaxSchedule, ScheduleError> {
        Ok(self.load_csv()?)
    }
}

/// Environment variable naming an on-disk data directory.
pub const DATA_DIR_ENV: &str = "TAXCALC_DATA_DIR";

/// The directory named by [`DATA_DIR_ENV`], if set.
pub fn data_dir_from_env() -> Option<PathBuf> {
    std::env::var_os(DATA_DIR_ENV).map(PathBuf::from)
}

/// `./data` in the current working directory, if it exists.
///
/// Unlike [`data_dir_from_env`] this is an implicit location: callers
/// should fall back to the bundled data when it holds no tax years.
pub fn cwd_data_dir() -> Option<PathBuf> {
    let cwd_data = PathBuf::from("./data");
    cwd_data.is_dir().then_some(cwd_data)
}

/// A registry holding every bundled tax year.
pub fn bundled_registry() -> Result<ScheduleRegistry, ScheduleError> {
    let mut registry = ScheduleRegistry::new();
    for source in BundledSource::all() {
        registry.load_from(&source)?;
    }
    Ok(registry)
}

/// A registry holding every year found under `root`.
pub fn directory_registry(root: &Path) -> Result<ScheduleRegistry, ScheduleLoadError> {
    let sources = DirectorySource::discover(root)?;
    if sources.is_empty() {
        warn!(root = %root.display(), "no tax year directories found");
    } else {
        info!(root = %root.display(), years = sources.len(), "loading rate data from directory");
    }

    let mut registry = ScheduleRegistry::new();
    for source in &sources {
        registry.register(source.load_csv()?);
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bundled_years_are_ascending() {
        let years: Vec<i32> = BundledSource::all().iter().map(BundledSource::tax_year).collect();

        let mut sorted = years.clone();
        sorted.sort_unstable();
        assert_eq!(years, sorted);
        assert!(years.contains(&2026));
    }

    #[test]
    fn unknown_bundled_year_is_none() {
        assert!(BundledSource::for_year(1999).is_none());
    }

    #[test]
    fn bundled_source_describes_its_year() {
        let source = BundledSource::for_year(2026).unwrap();

        assert_eq!(source.describe(), "bundled 2026");
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let source = DirectorySource::new("/nonexistent/taxcalc", 2026);

        match source.load() {
            Err(ScheduleError::Source(message)) => {
                assert!(message.contains("brackets.csv"), "got: {message}");
            }
            other => panic!("expected Source error, got {other:?}"),
        }
    }

    #[test]
    fn directory_without_year_dirs_gives_empty_registry() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("archive")).unwrap();

        let registry = directory_registry(root.path()).unwrap();

        assert!(registry.is_empty());
    }

    #[test]
    fn year_dir_joins_root_and_year() {
        let source = DirectorySource::new("rates", 2026);

        assert_eq!(source.year_dir(), PathBuf::from("rates").join("2026"));
    }
}

//! Report configuration for sankey-gen
//!
//! The configuration is a YAML document with five required sections:
//! `paths`, `time`, `transactions`, `categories` and `paycheck`. It is
//! loaded once at startup and only read afterwards.

use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::paths::ConfigPaths;
use crate::error::{SankeyError, SankeyResult};
use crate::models::DateWindow;

/// Date format used by the `time` section and the ledger
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Input and output file overrides
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathSettings {
    /// Read the ledger from `input_file` instead of the default location
    #[serde(default)]
    pub use_custom_input: bool,

    #[serde(default)]
    pub input_file: Option<PathBuf>,

    /// Write the diagram to `output_path` instead of the default file
    #[serde(default)]
    pub use_custom_output: bool,

    #[serde(default)]
    pub output_path: Option<PathBuf>,
}

/// Reporting period
#[derive(Debug, Clone, Deserialize)]
pub struct TimeSettings {
    #[serde(deserialize_with = "deserialize_date")]
    pub start_date: NaiveDate,

    #[serde(deserialize_with = "deserialize_date")]
    pub end_date: NaiveDate,
}

impl TimeSettings {
    /// The window transactions must fall in
    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.start_date, self.end_date)
    }
}

/// Where the take-home figure comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IncomeSourceKind {
    /// Sum of credit transactions in the window
    #[default]
    Transactions,
    /// Configured paycheck minus pretax deductions (legacy)
    Paystub,
}

impl fmt::Display for IncomeSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transactions => write!(f, "transactions"),
            Self::Paystub => write!(f, "paystub"),
        }
    }
}

/// Transaction selection and presentation rules
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionSettings {
    pub ignore_vendors: Vec<String>,

    pub ignore_categories: Vec<String>,

    /// Group by label instead of category when a label exists
    pub prefer_labels: bool,

    /// Categories summing below this are folded into "Misc"
    pub category_threshold: i64,

    /// Emit percentages of income instead of absolute amounts
    pub use_percentages: bool,

    #[serde(default)]
    pub income_source: IncomeSourceKind,
}

/// A named group of categories that is rolled up into one diagram node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub name: String,
    pub members: Vec<String>,
}

impl CategoryGroup {
    pub fn new(name: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    /// Check if a category belongs to this group
    ///
    /// A category named like the group itself belongs to it.
    pub fn includes(&self, category: &str) -> bool {
        self.name == category || self.members.iter().any(|m| m == category)
    }
}

/// Paycheck figures for the legacy paystub income source
#[derive(Debug, Clone, Deserialize)]
pub struct PaycheckSettings {
    /// Net earnings per two-week pay period
    pub net_earnings: f64,

    /// Pretax deductions per pay period, in declaration order
    #[serde(deserialize_with = "deserialize_ordered")]
    pub pretax: Vec<(String, f64)>,
}

/// Complete report configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub paths: PathSettings,
    pub time: TimeSettings,
    pub transactions: TransactionSettings,

    #[serde(deserialize_with = "deserialize_groups")]
    pub categories: Vec<CategoryGroup>,

    pub paycheck: PaycheckSettings,
}

impl Config {
    /// Parse and validate a configuration document
    pub fn from_yaml(contents: &str) -> SankeyResult<Self> {
        let config: Config = serde_yaml::from_str(contents)
            .map_err(|e| SankeyError::Config(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from a specific file
    pub fn load_from(path: &Path) -> SankeyResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SankeyError::Io(format!(
                "Failed to read configuration {}: {}",
                path.display(),
                e
            ))
        })?;
        log::info!("Loaded configuration from {}", path.display());
        Self::from_yaml(&contents)
    }

    /// Load the configuration, falling back to the sample file
    ///
    /// An explicit path must load. Otherwise the primary file is tried first
    /// and the sample file is used only when the primary does not exist.
    pub fn load(paths: &ConfigPaths) -> SankeyResult<Self> {
        if let Some(explicit) = paths.explicit() {
            return Self::load_from(explicit);
        }

        let primary = paths.primary();
        match std::fs::read_to_string(primary) {
            Ok(contents) => {
                log::info!("Loaded configuration from {}", primary.display());
                Self::from_yaml(&contents)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!(
                    "{} not found, falling back to {}",
                    primary.display(),
                    paths.fallback().display()
                );
                Self::load_from(paths.fallback())
            }
            Err(e) => Err(SankeyError::Io(format!(
                "Failed to read configuration {}: {}",
                primary.display(),
                e
            ))),
        }
    }

    /// Check values that parse fine but cannot produce a report
    pub fn validate(&self) -> SankeyResult<()> {
        if self.time.start_date >= self.time.end_date {
            return Err(SankeyError::Validation(format!(
                "time.start_date ({}) must be before time.end_date ({})",
                self.time.start_date.format(DATE_FORMAT),
                self.time.end_date.format(DATE_FORMAT)
            )));
        }

        if let Some(group) = self.categories.iter().find(|g| g.name.trim().is_empty()) {
            return Err(SankeyError::Validation(format!(
                "category group with members {:?} has an empty name",
                group.members
            )));
        }

        if self.paths.use_custom_input && self.paths.input_file.is_none() {
            return Err(SankeyError::Config(
                "paths.use_custom_input is set but paths.input_file is missing".into(),
            ));
        }

        if self.paths.use_custom_output && self.paths.output_path.is_none() {
            return Err(SankeyError::Config(
                "paths.use_custom_output is set but paths.output_path is missing".into(),
            ));
        }

        Ok(())
    }

    /// The reporting window
    pub fn window(&self) -> DateWindow {
        self.time.window()
    }

    /// Ledger file to read
    pub fn input_path(&self) -> PathBuf {
        match (&self.paths.input_file, self.paths.use_custom_input) {
            (Some(path), true) => path.clone(),
            _ => PathBuf::from(super::paths::DEFAULT_INPUT_FILE),
        }
    }

    /// Diagram file to write
    pub fn output_path(&self) -> PathBuf {
        match (&self.paths.output_path, self.paths.use_custom_output) {
            (Some(path), true) => path.clone(),
            _ => PathBuf::from(super::paths::DEFAULT_OUTPUT_FILE),
        }
    }
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| {
        de::Error::custom(format!("invalid date '{}' (expected MM/DD/YYYY): {}", s, e))
    })
}

/// Visitor that keeps a mapping's entries in document order
struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = Vec<(String, V)>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a mapping")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, V>()? {
            if entries.iter().any(|(existing, _)| *existing == key) {
                return Err(de::Error::custom(format!("duplicate key '{}'", key)));
            }
            entries.push((key, value));
        }
        Ok(entries)
    }
}

fn deserialize_ordered<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    deserializer.deserialize_any(OrderedMapVisitor(PhantomData))
}

fn deserialize_groups<'de, D>(deserializer: D) -> Result<Vec<CategoryGroup>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<(String, Option<Vec<String>>)> = deserialize_ordered(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|(name, members)| CategoryGroup::new(name, members.unwrap_or_default()))
        .collect())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    pub(crate) const SAMPLE: &str = r#"
paths:
  use_custom_input: false
  use_custom_output: false
time:
  start_date: "05/01/2018"
  end_date: "08/01/2018"
transactions:
  ignore_vendors: ["Amazon"]
  ignore_categories: ["Transfer", "Credit Card Payment"]
  prefer_labels: false
  category_threshold: 50
  use_percentages: false
categories:
  Lodging: ["Hotel"]
  Food: ["Restaurants", "Groceries"]
  Car: []
paycheck:
  net_earnings: 1000
  pretax:
    Federal Income Tax: 100
    Social Security: 30
"#;

    #[test]
    fn test_parse_sample() {
        let config = Config::from_yaml(SAMPLE).unwrap();

        assert_eq!(
            config.time.start_date,
            NaiveDate::from_ymd_opt(2018, 5, 1).unwrap()
        );
        assert_eq!(config.transactions.ignore_vendors, vec!["Amazon"]);
        assert_eq!(config.transactions.category_threshold, 50);
        assert_eq!(
            config.transactions.income_source,
            IncomeSourceKind::Transactions
        );
        assert_eq!(config.paycheck.net_earnings, 1000.0);
        assert_eq!(
            config.paycheck.pretax,
            vec![
                ("Federal Income Tax".to_string(), 100.0),
                ("Social Security".to_string(), 30.0)
            ]
        );
    }

    #[test]
    fn test_groups_keep_declared_order() {
        let config = Config::from_yaml(SAMPLE).unwrap();
        let names: Vec<_> = config.categories.iter().map(|g| g.name.as_str()).collect();

        assert_eq!(names, vec!["Lodging", "Food", "Car"]);
        assert_eq!(config.categories[1].members, vec!["Restaurants", "Groceries"]);
        assert!(config.categories[2].members.is_empty());
    }

    #[test]
    fn test_group_includes_own_name() {
        let group = CategoryGroup::new("Car", vec!["Gas & Fuel".into()]);
        assert!(group.includes("Car"));
        assert!(group.includes("Gas & Fuel"));
        assert!(!group.includes("Hotel"));
    }

    #[test]
    fn test_missing_section_is_fatal() {
        let without_paycheck = SAMPLE.split("paycheck:").next().unwrap();
        let err = Config::from_yaml(without_paycheck).unwrap_err();

        assert!(matches!(err, SankeyError::Config(_)));
        assert!(err.to_string().contains("paycheck"));
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let yaml = SAMPLE.replace("  category_threshold: 50\n", "");
        let err = Config::from_yaml(&yaml).unwrap_err();
        assert!(err.to_string().contains("category_threshold"));
    }

    #[test]
    fn test_missing_ignore_lists_are_fatal() {
        let yaml = SAMPLE.replace("  ignore_vendors: [\"Amazon\"]\n", "");
        let err = Config::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, SankeyError::Config(_)));
        assert!(err.to_string().contains("ignore_vendors"));

        let yaml = SAMPLE.replace(
            "  ignore_categories: [\"Transfer\", \"Credit Card Payment\"]\n",
            "",
        );
        let err = Config::from_yaml(&yaml).unwrap_err();
        assert!(err.to_string().contains("ignore_categories"));
    }

    #[test]
    fn test_missing_pretax_is_fatal() {
        let yaml = SAMPLE.replace(
            "  pretax:\n    Federal Income Tax: 100\n    Social Security: 30\n",
            "",
        );
        let err = Config::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, SankeyError::Config(_)));
        assert!(err.to_string().contains("pretax"));
    }

    #[test]
    fn test_empty_pretax_is_allowed() {
        let yaml = SAMPLE.replace(
            "  pretax:\n    Federal Income Tax: 100\n    Social Security: 30\n",
            "  pretax:\n",
        );
        let config = Config::from_yaml(&yaml).unwrap();
        assert!(config.paycheck.pretax.is_empty());
    }

    #[test]
    fn test_bad_date_is_fatal() {
        let yaml = SAMPLE.replace("05/01/2018", "2018-05-01");
        assert!(Config::from_yaml(&yaml).is_err());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let yaml = SAMPLE.replace("08/01/2018", "04/01/2018");
        let err = Config::from_yaml(&yaml).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_income_source_paystub() {
        let yaml = SAMPLE.replace(
            "  use_percentages: false\n",
            "  use_percentages: false\n  income_source: paystub\n",
        );
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.transactions.income_source, IncomeSourceKind::Paystub);
    }

    #[test]
    fn test_default_paths() {
        let config = Config::from_yaml(SAMPLE).unwrap();
        assert_eq!(config.input_path(), PathBuf::from("data/transactions.csv"));
        assert_eq!(config.output_path(), PathBuf::from("output.txt"));
    }

    #[test]
    fn test_custom_paths() {
        let yaml = SAMPLE.replace(
            "  use_custom_input: false\n  use_custom_output: false\n",
            "  use_custom_input: true\n  input_file: ledger.csv\n  use_custom_output: true\n  output_path: out/sankey.txt\n",
        );
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.input_path(), PathBuf::from("ledger.csv"));
        assert_eq!(config.output_path(), PathBuf::from("out/sankey.txt"));
    }

    #[test]
    fn test_custom_input_without_file_rejected() {
        let yaml = SAMPLE.replace("  use_custom_input: false\n", "  use_custom_input: true\n");
        assert!(Config::from_yaml(&yaml).is_err());
    }

    #[test]
    fn test_load_falls_back_to_sample() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ConfigPaths::in_dir(temp_dir.path());
        std::fs::write(paths.fallback(), SAMPLE).unwrap();

        let config = Config::load(&paths).unwrap();
        assert_eq!(config.categories.len(), 3);
    }

    #[test]
    fn test_load_prefers_primary() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ConfigPaths::in_dir(temp_dir.path());
        std::fs::write(paths.primary(), SAMPLE.replace("50", "75")).unwrap();
        std::fs::write(paths.fallback(), SAMPLE).unwrap();

        let config = Config::load(&paths).unwrap();
        assert_eq!(config.transactions.category_threshold, 75);
    }

    #[test]
    fn test_load_fails_without_any_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ConfigPaths::in_dir(temp_dir.path());

        let err = Config::load(&paths).unwrap_err();
        assert!(matches!(err, SankeyError::Io(_)));
    }

    #[test]
    fn test_explicit_path_does_not_fall_back() {
        let temp_dir = TempDir::new().unwrap();
        let mut paths = ConfigPaths::in_dir(temp_dir.path());
        std::fs::write(paths.fallback(), SAMPLE).unwrap();
        paths.set_explicit(temp_dir.path().join("missing.yaml"));

        assert!(Config::load(&paths).is_err());
    }
}

use crate::config::GridConfiguration;
use crate::params::text::parse_params;
use crate::params::yaml::parse_yaml_params;
use crate::params::{ParamSource, ParamTable};
use crate::variables::VariableCatalog;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{info, warn};
use std::path::Path;

/// Parameter file syntax, chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamFormat {
    /// `key = value ...` lines
    Text,
    Yaml,
}

impl ParamFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => ParamFormat::Yaml,
            _ => ParamFormat::Text,
        }
    }
}

/// Load a parameter file into a table
pub fn load_params(params_path: &Path) -> Result<ParamTable> {
    info!("Loading parameters from: {:?}", params_path);

    let content = std::fs::read_to_string(params_path)
        .wrap_err_with(|| format!("Failed to read parameter file '{}'", params_path.display()))?;

    let table = match ParamFormat::from_path(params_path) {
        ParamFormat::Yaml => parse_yaml_params(&content),
        ParamFormat::Text => parse_params(&content),
    }
    .wrap_err_with(|| format!("Failed to parse parameter file '{}'", params_path.display()))?;

    info!("Read {} parameters", table.len());
    check_params_compatibility(&table);

    Ok(table)
}

/// Load a variable catalog from a YAML file
pub fn load_catalog(catalog_path: &Path) -> Result<VariableCatalog> {
    let content = std::fs::read_to_string(catalog_path)
        .wrap_err_with(|| format!("Failed to read variable catalog '{}'", catalog_path.display()))?;
    let catalog = VariableCatalog::from_yaml(&content)
        .wrap_err_with(|| format!("Failed to parse variable catalog '{}'", catalog_path.display()))?;
    Ok(catalog)
}

/// Load a parameter file and resolve the grid configuration
pub fn load_configuration(params_path: &Path, catalog: &VariableCatalog) -> Result<GridConfiguration> {
    let table = load_params(params_path)?;
    let config = GridConfiguration::build(&table, catalog)
        .wrap_err_with(|| format!("Invalid grid configuration in '{}'", params_path.display()))?;
    Ok(config)
}

/// Warn about keys that are shadowed by their engine-named counterparts
pub fn check_params_compatibility<S: ParamSource + ?Sized>(source: &S) {
    for (engine_key, alias) in [("max_grid_size", "max_box_size"), ("block_factor", "min_box_size")] {
        if source.contains(engine_key) && source.contains(alias) {
            warn!(
                "Both '{}' and '{}' are set; '{}' takes precedence and '{}' is ignored",
                engine_key, alias, engine_key, alias
            );
        }
    }
}

/// Write a resolved configuration as JSON (`.json`) or YAML (anything else)
pub fn write_configuration(config: &GridConfiguration, output_path: &Path) -> Result<()> {
    let serialized = match output_path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::to_string_pretty(config)?,
        _ => serde_yaml::to_string(config)?,
    };
    std::fs::write(output_path, serialized)
        .wrap_err_with(|| format!("Failed to write '{}'", output_path.display()))?;
    info!("Resolved configuration written to: {:?}", output_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    const PARAMS_TXT: &str = r#"
# Reflective in x, Sommerfeld outer boundary
N_full = 64
L_full = 32.0
isPeriodic = 0 1 1
lo_boundary = 2 0 0
hi_boundary = 1 0 0
vars_parity = 0 1
vars_asymptotic_values = 1.0 0.0
max_level = 1
regrid_interval = 1 1
chk_prefix = chk_
plot_prefix = plt_
num_plot_vars = 2
plot_vars = phi rho
"#;

    const PARAMS_YAML: &str = r#"
N_full: 64
L_full: 32.0
isPeriodic: [false, true, true]
lo_boundary: [2, 0, 0]
hi_boundary: [1, 0, 0]
vars_parity: [0, 1]
vars_asymptotic_values: [1.0, 0.0]
max_level: 1
regrid_interval: [1, 1]
chk_prefix: chk_
plot_prefix: plt_
num_plot_vars: 2
plot_vars: [phi, rho]
"#;

    fn catalog() -> VariableCatalog {
        VariableCatalog::new(["phi", "Pi"], ["rho"])
    }

    fn temp_with_suffix(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ParamFormat::from_path(Path::new("params.yaml")), ParamFormat::Yaml);
        assert_eq!(ParamFormat::from_path(Path::new("params.yml")), ParamFormat::Yaml);
        assert_eq!(ParamFormat::from_path(Path::new("params.txt")), ParamFormat::Text);
        assert_eq!(ParamFormat::from_path(Path::new("params")), ParamFormat::Text);
    }

    #[test]
    fn test_text_and_yaml_agree() {
        let txt = temp_with_suffix(".txt", PARAMS_TXT);
        let yaml = temp_with_suffix(".yaml", PARAMS_YAML);

        let from_txt = load_configuration(txt.path(), &catalog()).unwrap();
        let from_yaml = load_configuration(yaml.path(), &catalog()).unwrap();
        assert_eq!(from_txt, from_yaml);

        assert_eq!(from_txt.extent().half_counts, [32, 64, 64]);
        assert_eq!(from_txt.length(), 32.0);
        assert_eq!(from_txt.coarsest_dx(), 0.5);
        assert_eq!(from_txt.center(), [0.0, 16.0, 16.0]);
        assert_eq!(from_txt.num_plot_vars(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = load_params(Path::new("/nonexistent/params.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read parameter file"));
    }

    #[test]
    fn test_invalid_configuration_reports_file() {
        let file = temp_with_suffix(".txt", "N = 16\nN_full = 32\n");
        let err = load_configuration(file.path(), &catalog()).unwrap_err();
        assert!(err.to_string().contains("Invalid grid configuration"));
        assert!(format!("{:?}", err).contains("Conflicting parameters"));
    }

    #[test]
    fn test_load_catalog() {
        let file = temp_with_suffix(".yaml", "evolution: [phi, Pi]\ndiagnostic: [rho]\n");
        let loaded = load_catalog(file.path()).unwrap();
        assert_eq!(loaded, catalog());
    }

    #[test]
    fn test_load_catalog_rejects_shared_names() {
        let file = temp_with_suffix(".yaml", "evolution: [phi, rho]\ndiagnostic: [rho]\n");
        let err = load_catalog(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse variable catalog"));
        assert!(format!("{:?}", err).contains("'rho' is defined more than once"));
    }

    #[test]
    fn test_write_configuration_json_and_yaml() {
        let file = temp_with_suffix(".txt", PARAMS_TXT);
        let config = load_configuration(file.path(), &catalog()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("grid.json");
        write_configuration(&config, &json_path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["extent"]["half_counts"][0], 32);
        assert_eq!(json["ref_ratios"], serde_json::json!([2, 2]));

        let yaml_path = dir.path().join("grid.yaml");
        write_configuration(&config, &yaml_path).unwrap();
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&std::fs::read_to_string(&yaml_path).unwrap()).unwrap();
        assert_eq!(yaml["plot_prefix"], serde_yaml::Value::from("plt_"));
    }

    #[test]
    fn test_compatibility_check_does_not_fail() {
        let table = ParamTable::new().with("max_grid_size", 16).with("max_box_size", 32);
        check_params_compatibility(&table);
    }
}

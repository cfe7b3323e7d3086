//! Dependency and script extraction from manifests.
//!
//! Python extraction is plain text matching, not a parser. Unusual
//! formatting yields nothing rather than an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cap on production dependencies taken from each source
pub const MAX_PRODUCTION_DEPENDENCIES: usize = 20;
/// Cap on development dependencies
pub const MAX_DEVELOPMENT_DEPENDENCIES: usize = 10;

static PYPROJECT_DEPENDENCIES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)dependencies\s*=\s*\[(.*?)\]").expect("pyproject pattern is valid")
});

static VERSION_SPECIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[=<>!~]").expect("version specifier pattern is valid"));

/// Production and development dependency names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependencies {
    /// Runtime dependencies
    pub production: Vec<String>,
    /// Development-only dependencies
    pub development: Vec<String>,
}

/// Collects dependency names from `package.json`, `requirements.txt` and
/// `pyproject.toml`
///
/// Each source contributes at most [`MAX_PRODUCTION_DEPENDENCIES`]
/// production names; the combined list is capped at the same size.
pub fn extract_dependencies(
    package_json: Option<&Value>,
    requirements_txt: Option<&str>,
    pyproject_toml: Option<&str>,
) -> Dependencies {
    let mut deps = Dependencies::default();

    if let Some(package_json) = package_json {
        deps.production
            .extend(object_keys(package_json.get("dependencies"), MAX_PRODUCTION_DEPENDENCIES));
        deps.development.extend(object_keys(
            package_json.get("devDependencies"),
            MAX_DEVELOPMENT_DEPENDENCIES,
        ));
    }

    if let Some(requirements) = requirements_txt {
        deps.production.extend(parse_requirements(requirements));
    }

    if let Some(pyproject) = pyproject_toml {
        deps.production.extend(parse_pyproject_dependencies(pyproject));
    }

    deps.production.truncate(MAX_PRODUCTION_DEPENDENCIES);
    deps.development.truncate(MAX_DEVELOPMENT_DEPENDENCIES);
    deps
}

/// Package names from a requirements file, skipping comments and blanks
pub fn parse_requirements(requirements: &str) -> Vec<String> {
    requirements
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(strip_version)
        .filter(|name| !name.is_empty())
        .take(MAX_PRODUCTION_DEPENDENCIES)
        .collect()
}

/// Package names from the first `dependencies = [...]` list of a pyproject
pub fn parse_pyproject_dependencies(pyproject: &str) -> Vec<String> {
    let Some(caps) = PYPROJECT_DEPENDENCIES.captures(pyproject) else {
        return Vec::new();
    };

    caps[1]
        .lines()
        .map(|line| line.trim().replace(['"', ','], ""))
        .filter(|line| !line.is_empty())
        .map(|line| strip_version(&line))
        .filter(|name| !name.is_empty())
        .take(MAX_PRODUCTION_DEPENDENCIES)
        .collect()
}

/// `scripts` entries of `package.json`, in document order
pub fn extract_scripts(package_json: Option<&Value>) -> Vec<(String, String)> {
    package_json
        .and_then(|manifest| manifest.get("scripts"))
        .and_then(Value::as_object)
        .map(|scripts| {
            scripts
                .iter()
                .filter_map(|(name, command)| {
                    command.as_str().map(|c| (name.clone(), c.to_string()))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn object_keys(value: Option<&Value>, limit: usize) -> Vec<String> {
    value
        .and_then(Value::as_object)
        .map(|map| map.keys().take(limit).cloned().collect())
        .unwrap_or_default()
}

fn strip_version(spec: &str) -> String {
    VERSION_SPECIFIER
        .split(spec)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_package_json_keeps_document_order() {
        let manifest: Value = serde_json::from_str(
            r#"{"dependencies": {"zod": "1", "axios": "1", "next": "14"},
                "devDependencies": {"typescript": "5"}}"#,
        )
        .unwrap();
        let deps = extract_dependencies(Some(&manifest), None, None);
        assert_eq!(deps.production, vec!["zod", "axios", "next"]);
        assert_eq!(deps.development, vec!["typescript"]);
    }

    #[test]
    fn test_caps_package_json() {
        let mut dependencies = serde_json::Map::new();
        let mut dev_dependencies = serde_json::Map::new();
        for i in 0..30 {
            dependencies.insert(format!("dep-{}", i), json!("1.0.0"));
            dev_dependencies.insert(format!("dev-{}", i), json!("1.0.0"));
        }
        let manifest = json!({
            "dependencies": dependencies,
            "devDependencies": dev_dependencies,
        });

        let deps = extract_dependencies(Some(&manifest), None, None);
        assert_eq!(deps.production.len(), 20);
        assert_eq!(deps.development.len(), 10);
        assert_eq!(deps.production[0], "dep-0");
    }

    #[test]
    fn test_parse_requirements() {
        let requirements = "# web\nflask==2.3.0\n\nrequests>=2.0\nnumpy\nuvicorn~=0.23\nblack!=23.1\n";
        assert_eq!(
            parse_requirements(requirements),
            vec!["flask", "requests", "numpy", "uvicorn", "black"]
        );
    }

    #[test]
    fn test_parse_pyproject() {
        let pyproject = r#"
[project]
name = "widget"
dependencies = [
    "fastapi>=0.100",
    "pydantic==2.4.0",
    "httpx",
]
"#;
        assert_eq!(
            parse_pyproject_dependencies(pyproject),
            vec!["fastapi", "pydantic", "httpx"]
        );
    }

    #[test]
    fn test_parse_pyproject_without_list() {
        assert!(parse_pyproject_dependencies("[tool.poetry]\nname = \"x\"\n").is_empty());
    }

    #[test]
    fn test_python_sources_share_the_cap() {
        let requirements: String = (0..15).map(|i| format!("req{}\n", i)).collect();
        let pyproject = format!(
            "dependencies = [\n{}]\n",
            (0..15).map(|i| format!("\"py{}\",\n", i)).collect::<String>()
        );
        let deps = extract_dependencies(None, Some(&requirements), Some(&pyproject));
        assert_eq!(deps.production.len(), MAX_PRODUCTION_DEPENDENCIES);
        assert_eq!(deps.production[15], "py0");
    }

    #[test]
    fn test_extract_scripts() {
        let manifest: Value =
            serde_json::from_str(r#"{"scripts": {"dev": "next dev", "build": "next build", "n": 1}}"#)
                .unwrap();
        assert_eq!(
            extract_scripts(Some(&manifest)),
            vec![
                ("dev".to_string(), "next dev".to_string()),
                ("build".to_string(), "next build".to_string()),
            ]
        );
        assert!(extract_scripts(None).is_empty());
    }
}

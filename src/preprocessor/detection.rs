//! Tech stack detection from the file tree and `package.json`.
//!
//! All lookups are ordered tables: output order follows table order, and
//! where only one answer is possible the first matching row wins.

use serde_json::Value;

use crate::github::FileTreeEntry;

/// Extension to language, first match per file wins
pub const LANGUAGE_EXTENSIONS: &[(&str, &str)] = &[
    (".ts", "TypeScript"),
    (".tsx", "TypeScript"),
    (".js", "JavaScript"),
    (".jsx", "JavaScript"),
    (".py", "Python"),
    (".go", "Go"),
    (".rs", "Rust"),
    (".java", "Java"),
    (".kt", "Kotlin"),
    (".rb", "Ruby"),
    (".php", "PHP"),
    (".cs", "C#"),
    (".cpp", "C++"),
    (".c", "C"),
    (".swift", "Swift"),
    (".scala", "Scala"),
    (".vue", "Vue"),
    (".svelte", "Svelte"),
];

/// npm package name to framework label
pub const FRAMEWORK_PACKAGES: &[(&str, &str)] = &[
    ("next", "Next.js"),
    ("react", "React"),
    ("vue", "Vue.js"),
    ("nuxt", "Nuxt.js"),
    ("@angular/core", "Angular"),
    ("svelte", "Svelte"),
    ("express", "Express.js"),
    ("fastify", "Fastify"),
    ("nestjs", "NestJS"),
    ("@nestjs/core", "NestJS"),
    ("koa", "Koa"),
    ("hapi", "Hapi"),
    ("gatsby", "Gatsby"),
    ("remix", "Remix"),
    ("astro", "Astro"),
    ("electron", "Electron"),
    ("vite", "Vite"),
    ("webpack", "Webpack"),
    ("tailwindcss", "Tailwind CSS"),
    ("prisma", "Prisma"),
    ("drizzle-orm", "Drizzle ORM"),
    ("sequelize", "Sequelize"),
    ("mongoose", "Mongoose"),
    ("jest", "Jest"),
    ("vitest", "Vitest"),
    ("mocha", "Mocha"),
    ("cypress", "Cypress"),
    ("playwright", "Playwright"),
];

/// How a tool rule matches a path
#[derive(Debug, Clone, Copy)]
pub enum PathRule {
    /// Path equals the value
    Exact(&'static str),
    /// Path starts with the value
    Prefix(&'static str),
}

impl PathRule {
    fn matches(&self, path: &str) -> bool {
        match self {
            PathRule::Exact(expected) => path == *expected,
            PathRule::Prefix(prefix) => path.starts_with(prefix),
        }
    }
}

/// Tool label and the path rules that reveal it
pub const TOOL_RULES: &[(&str, &[PathRule])] = &[
    (
        "Docker",
        &[PathRule::Exact("Dockerfile"), PathRule::Prefix("docker-compose")],
    ),
    ("GitHub Actions", &[PathRule::Prefix(".github/workflows")]),
    ("GitLab CI", &[PathRule::Exact(".gitlab-ci.yml")]),
    ("Travis CI", &[PathRule::Exact(".travis.yml")]),
    ("CircleCI", &[PathRule::Prefix(".circleci/")]),
    ("Make", &[PathRule::Exact("Makefile")]),
    (
        "ESLint",
        &[
            PathRule::Exact(".eslintrc.js"),
            PathRule::Exact(".eslintrc.json"),
            PathRule::Exact("eslint.config.js"),
            PathRule::Exact("eslint.config.mjs"),
        ],
    ),
    (
        "Prettier",
        &[PathRule::Exact(".prettierrc"), PathRule::Exact("prettier.config.js")],
    ),
    ("Vercel", &[PathRule::Exact("vercel.json")]),
    ("Netlify", &[PathRule::Exact("netlify.toml")]),
];

/// Indicator files in priority order; only the first hit is reported
pub const PACKAGE_MANAGER_INDICATORS: &[(&[&str], &str)] = &[
    (&["pnpm-lock.yaml"], "pnpm"),
    (&["yarn.lock"], "yarn"),
    (&["package-lock.json"], "npm"),
    (&["bun.lockb"], "bun"),
    (&["requirements.txt", "pyproject.toml"], "pip"),
    (&["Cargo.toml"], "cargo"),
    (&["go.mod"], "go"),
    (&["Gemfile"], "bundler"),
    (&["pom.xml"], "maven"),
    (&["build.gradle"], "gradle"),
];

/// Languages from file extensions, deduplicated in first-seen order
pub fn detect_languages(file_tree: &[FileTreeEntry]) -> Vec<String> {
    let mut languages: Vec<String> = Vec::new();

    for entry in file_tree.iter().filter(|e| e.is_file()) {
        let hit = LANGUAGE_EXTENSIONS
            .iter()
            .find(|(ext, _)| entry.path.ends_with(ext));
        if let Some((_, language)) = hit {
            push_unique(&mut languages, language);
        }
    }

    languages
}

/// Merges the repository's primary language in front of the detected ones
pub fn merge_languages(primary: Option<&str>, detected: Vec<String>) -> Vec<String> {
    let mut languages = Vec::with_capacity(detected.len() + 1);
    if let Some(primary) = primary.filter(|p| !p.is_empty()) {
        languages.push(primary.to_string());
    }
    for language in detected {
        push_unique(&mut languages, &language);
    }
    languages
}

/// Frameworks named by `dependencies` or `devDependencies`, in table order
pub fn detect_frameworks(package_json: Option<&Value>) -> Vec<String> {
    let Some(package_json) = package_json else {
        return Vec::new();
    };

    let dependencies = package_json.get("dependencies");
    let dev_dependencies = package_json.get("devDependencies");

    let mut frameworks: Vec<String> = Vec::new();
    for (package, label) in FRAMEWORK_PACKAGES {
        // devDependencies shadow dependencies on a name clash
        let version = dev_dependencies
            .and_then(|deps| deps.get(*package))
            .or_else(|| dependencies.and_then(|deps| deps.get(*package)));
        if version.is_some_and(is_truthy) {
            frameworks.push(label.to_string());
        }
    }
    frameworks
}

/// Tools revealed by marker paths, in table order
pub fn detect_tools(file_tree: &[FileTreeEntry]) -> Vec<String> {
    TOOL_RULES
        .iter()
        .filter(|(_, rules)| {
            file_tree
                .iter()
                .any(|entry| rules.iter().any(|rule| rule.matches(&entry.path)))
        })
        .map(|(label, _)| label.to_string())
        .collect()
}

/// The single highest-priority package manager with an indicator present
pub fn detect_package_manager(file_tree: &[FileTreeEntry]) -> Option<String> {
    PACKAGE_MANAGER_INDICATORS
        .iter()
        .find(|(indicators, _)| {
            file_tree
                .iter()
                .any(|entry| indicators.contains(&entry.path.as_str()))
        })
        .map(|(_, manager)| manager.to_string())
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tree(paths: &[&str]) -> Vec<FileTreeEntry> {
        paths.iter().map(|p| FileTreeEntry::file(*p)).collect()
    }

    #[test]
    fn test_detect_languages_dedup_and_order() {
        let files = tree(&["src/main.rs", "web/app.tsx", "web/index.ts", "lib.rs", "build.c"]);
        assert_eq!(detect_languages(&files), vec!["Rust", "TypeScript", "C"]);
    }

    #[test]
    fn test_detect_languages_ignores_directories() {
        let files = vec![FileTreeEntry::directory("weird.py")];
        assert!(detect_languages(&files).is_empty());
    }

    #[test]
    fn test_csharp_is_not_c() {
        assert_eq!(detect_languages(&tree(&["Program.cs"])), vec!["C#"]);
    }

    #[test]
    fn test_merge_languages_puts_primary_first() {
        let merged = merge_languages(
            Some("TypeScript"),
            vec!["JavaScript".to_string(), "TypeScript".to_string()],
        );
        assert_eq!(merged, vec!["TypeScript", "JavaScript"]);
        assert_eq!(merge_languages(None, Vec::new()), Vec::<String>::new());
    }

    #[test]
    fn test_detect_frameworks_in_table_order() {
        let manifest = json!({
            "dependencies": { "react": "^18.0.0", "next": "14.0.0" },
            "devDependencies": { "jest": "^29.0.0", "vite": "" }
        });
        assert_eq!(
            detect_frameworks(Some(&manifest)),
            vec!["Next.js", "React", "Jest"]
        );
    }

    #[test]
    fn test_detect_frameworks_without_manifest() {
        assert!(detect_frameworks(None).is_empty());
        assert!(detect_frameworks(Some(&json!({ "name": "x" }))).is_empty());
    }

    #[test]
    fn test_detect_tools() {
        let files = tree(&[
            "docker-compose.override.yml",
            ".github/workflows/ci.yml",
            "Makefile",
            ".prettierrc",
            "netlify.toml",
        ]);
        assert_eq!(
            detect_tools(&files),
            vec!["Docker", "GitHub Actions", "Make", "Prettier", "Netlify"]
        );
    }

    #[test]
    fn test_package_manager_priority() {
        let files = tree(&["Cargo.toml", "package-lock.json", "yarn.lock"]);
        assert_eq!(detect_package_manager(&files).as_deref(), Some("yarn"));

        let files = tree(&["pyproject.toml", "go.mod"]);
        assert_eq!(detect_package_manager(&files).as_deref(), Some("pip"));

        assert_eq!(detect_package_manager(&tree(&["package.json"])), None);
    }

    #[test]
    fn test_nested_indicators_do_not_count() {
        assert_eq!(detect_package_manager(&tree(&["crates/a/Cargo.toml"])), None);
    }
}

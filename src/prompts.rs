//! Prompt construction.
//!
//! Sections and tones are closed tables. Rendering is deterministic: the same
//! context, selection, tone and language always give the same prompt.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GeneratorError, Result};
use crate::preprocessor::ProcessedContext;

/// Production dependencies listed in the prompt
pub const PROMPT_PRODUCTION_DEPENDENCIES: usize = 15;
/// Development dependencies listed in the prompt
pub const PROMPT_DEVELOPMENT_DEPENDENCIES: usize = 10;
/// Scripts listed in the prompt
pub const PROMPT_SCRIPTS: usize = 10;

const ROLE_PREAMBLE: &str =
    "You are a technical writer creating a README.md file for an open-source project.";

const CRITICAL_RULES: &str = "CRITICAL RULES:
- ONLY use information provided above - do NOT infer or guess
- Do NOT invent features, APIs, or technologies not explicitly listed
- Do NOT add placeholder content like \"[describe...]\" or \"[add...]\"
- If information is missing for a section, provide minimal accurate content or skip details
- Use actual package manager commands based on detected package manager (npm, yarn, pnpm, pip, etc.)
- For installation, only include commands that make sense for this repo
- For badges, use shields.io format and only include relevant ones (language, license, version if package.json version exists)
- Output must be valid Markdown
- Follow standard open-source README conventions";

/// One independently toggleable README section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    TitleDescription,
    Installation,
    Usage,
    Features,
    TechStack,
    Configuration,
    ApiDocumentation,
    Contributing,
    License,
    Badges,
}

impl Section {
    /// Every section, in prompt order
    pub const ALL: [Section; 10] = [
        Section::TitleDescription,
        Section::Installation,
        Section::Usage,
        Section::Features,
        Section::TechStack,
        Section::Configuration,
        Section::ApiDocumentation,
        Section::Contributing,
        Section::License,
        Section::Badges,
    ];

    /// Wire key, e.g. `title_description`
    pub fn key(self) -> &'static str {
        match self {
            Section::TitleDescription => "title_description",
            Section::Installation => "installation",
            Section::Usage => "usage",
            Section::Features => "features",
            Section::TechStack => "tech_stack",
            Section::Configuration => "configuration",
            Section::ApiDocumentation => "api_documentation",
            Section::Contributing => "contributing",
            Section::License => "license",
            Section::Badges => "badges",
        }
    }

    /// Fixed instruction sentence for the model
    pub fn instruction(self) -> &'static str {
        match self {
            Section::TitleDescription => "Title & Description: Project name as heading, concise description of what the project does.",
            Section::Installation => "Installation: Step-by-step installation instructions based on detected package manager and dependencies.",
            Section::Usage => "Usage: Basic usage examples and getting started guide.",
            Section::Features => "Features: List key features based on actual functionality detected in the codebase.",
            Section::TechStack => "Tech Stack: List technologies, frameworks, and tools used (only those detected).",
            Section::Configuration => "Configuration: Environment variables, config files, and setup options.",
            Section::ApiDocumentation => "API Documentation: Document any public APIs or endpoints if detected.",
            Section::Contributing => "Contributing: Guidelines for contributing to the project.",
            Section::License => "License: License information based on the LICENSE file.",
            Section::Badges => "Badges: Relevant shields.io badges (language, package manager, license, etc.).",
        }
    }
}

impl FromStr for Section {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        Section::ALL
            .into_iter()
            .find(|section| section.key() == key)
            .ok_or_else(|| GeneratorError::validation(format!("Invalid section: {}", key)))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which sections the generated README should contain
///
/// Missing keys deserialize as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionSelection {
    pub title_description: bool,
    pub installation: bool,
    pub usage: bool,
    pub features: bool,
    pub tech_stack: bool,
    pub configuration: bool,
    pub api_documentation: bool,
    pub contributing: bool,
    pub license: bool,
    pub badges: bool,
}

impl SectionSelection {
    /// Every section enabled
    pub fn all() -> Self {
        Self::from_sections(Section::ALL)
    }

    /// Enables exactly the given sections
    pub fn from_sections(sections: impl IntoIterator<Item = Section>) -> Self {
        let mut selection = Self::default();
        for section in sections {
            selection.set(section, true);
        }
        selection
    }

    /// Parses a comma-separated list of section keys
    pub fn parse_list(list: &str) -> Result<Self> {
        let sections = list
            .split(',')
            .filter(|key| !key.trim().is_empty())
            .map(Section::from_str)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_sections(sections))
    }

    pub fn is_selected(&self, section: Section) -> bool {
        match section {
            Section::TitleDescription => self.title_description,
            Section::Installation => self.installation,
            Section::Usage => self.usage,
            Section::Features => self.features,
            Section::TechStack => self.tech_stack,
            Section::Configuration => self.configuration,
            Section::ApiDocumentation => self.api_documentation,
            Section::Contributing => self.contributing,
            Section::License => self.license,
            Section::Badges => self.badges,
        }
    }

    pub fn set(&mut self, section: Section, value: bool) {
        let flag = match section {
            Section::TitleDescription => &mut self.title_description,
            Section::Installation => &mut self.installation,
            Section::Usage => &mut self.usage,
            Section::Features => &mut self.features,
            Section::TechStack => &mut self.tech_stack,
            Section::Configuration => &mut self.configuration,
            Section::ApiDocumentation => &mut self.api_documentation,
            Section::Contributing => &mut self.contributing,
            Section::License => &mut self.license,
            Section::Badges => &mut self.badges,
        };
        *flag = value;
    }

    /// Selected sections in prompt order
    pub fn selected(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|section| self.is_selected(*section))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.selected().is_empty()
    }
}

/// Writing tone of the generated README
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Technical,
    Marketing,
}

impl Tone {
    pub const ALL: [Tone; 4] = [
        Tone::Professional,
        Tone::Friendly,
        Tone::Technical,
        Tone::Marketing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Technical => "technical",
            Tone::Marketing => "marketing",
        }
    }

    /// Fixed tone sentence for the model
    pub fn instruction(self) -> &'static str {
        match self {
            Tone::Professional => "Use a professional, business-appropriate tone. Be clear, concise, and objective.",
            Tone::Friendly => "Use a friendly, welcoming tone. Be approachable and encourage community involvement.",
            Tone::Technical => "Use a technical, detailed tone. Be precise and include technical details where relevant.",
            Tone::Marketing => "Use a marketing-oriented tone. Highlight benefits, features, and value proposition.",
        }
    }
}

impl FromStr for Tone {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim().to_lowercase();
        Tone::ALL
            .into_iter()
            .find(|tone| tone.as_str() == value)
            .ok_or_else(|| {
                GeneratorError::validation(format!(
                    "Invalid tone: {} (expected one of professional, friendly, technical, marketing)",
                    s.trim()
                ))
            })
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders the single generation prompt
pub fn build_prompt(
    context: &ProcessedContext,
    sections: &SectionSelection,
    tone: Tone,
    language: &str,
) -> String {
    let selected_sections = sections
        .selected()
        .into_iter()
        .map(Section::instruction)
        .collect::<Vec<_>>()
        .join("\n- ");

    let existing_readme = context
        .existing_readme_summary
        .as_ref()
        .map(|summary| format!("EXISTING README:\n{}", summary))
        .unwrap_or_default();

    let context_block = format!(
        "
REPOSITORY INFORMATION:
- Name: {name}
- Full Name: {full_name}
- Description: {description}
- Primary Language: {primary_language}
- Topics: {topics}
- License: {license}
- Homepage: {homepage}
- Stats: {stars} stars, {forks} forks

TECH STACK (DETECTED):
- Languages: {languages}
- Frameworks: {frameworks}
- Tools: {tools}
- Package Manager: {package_manager}

DEPENDENCIES:
- Production: {production}
- Development: {development}

PROJECT STRUCTURE:
{structure}

SCRIPTS (from package.json or similar):
{scripts}

{existing_readme}

CONFIGURATION FILES SUMMARY:
{config_summary}
",
        name = context.repo_name,
        full_name = context.full_name,
        description = context.description,
        primary_language = or_fallback(context.primary_language.as_deref(), "Unknown"),
        topics = join_or(&context.topics, usize::MAX, "None"),
        license = or_fallback(context.license.as_deref(), "Not specified"),
        homepage = or_fallback(context.homepage.as_deref(), "None"),
        stars = context.stats.stars,
        forks = context.stats.forks,
        languages = join_or(&context.tech_stack.languages, usize::MAX, "None detected"),
        frameworks = join_or(&context.tech_stack.frameworks, usize::MAX, "None detected"),
        tools = join_or(&context.tech_stack.tools, usize::MAX, "None detected"),
        package_manager = or_fallback(context.tech_stack.package_manager.as_deref(), "Unknown"),
        production = join_or(
            &context.dependencies.production,
            PROMPT_PRODUCTION_DEPENDENCIES,
            "None"
        ),
        development = join_or(
            &context.dependencies.development,
            PROMPT_DEVELOPMENT_DEPENDENCIES,
            "None"
        ),
        structure = context.project_structure,
        scripts = render_scripts(&context.scripts),
        existing_readme = existing_readme,
        config_summary = context.config_summary,
    );

    format!(
        "{preamble}

{context_block}

INSTRUCTIONS:
1. Generate a complete, replacement README.md file
2. Write in {language} language
3. {tone}
4. Include ONLY these sections:
- {selected_sections}

{rules}

Generate the README.md now:",
        preamble = ROLE_PREAMBLE,
        context_block = context_block,
        language = language,
        tone = tone.instruction(),
        selected_sections = selected_sections,
        rules = CRITICAL_RULES,
    )
}

fn or_fallback<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|v| !v.is_empty()).unwrap_or(fallback)
}

fn join_or(values: &[String], limit: usize, fallback: &str) -> String {
    if values.is_empty() {
        return fallback.to_string();
    }
    values
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_scripts(scripts: &[(String, String)]) -> String {
    if scripts.is_empty() {
        return "None".to_string();
    }
    scripts
        .iter()
        .take(PROMPT_SCRIPTS)
        .map(|(name, command)| format!("- {}: {}", name, command))
        .collect::<Vec<_>>()
        .join("\n")
}

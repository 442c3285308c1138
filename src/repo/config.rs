//! The repository configuration file (`.git/config`).
//!
//! The file is an INI-style document: `[section]` headers followed by
//! `key = value` entries. Only the `core` section is interpreted here; every
//! other section and key is kept verbatim so that it survives a load/save
//! cycle untouched.

use std::{fmt, fs, path::Path, str::FromStr};

use super::{Error, Result};

/// Name of the section holding the keys this crate understands.
pub const CORE: &str = "core";

/// Version of the `.git` directory layout.
pub const REPOSITORY_FORMAT_VERSION: &str = "repositoryformatversion";

/// Whether changes to the executable bit are tracked.
pub const FILE_MODE: &str = "filemode";

/// Whether the repository has no worktree.
pub const BARE: &str = "bare";

/// The only `core.repositoryformatversion` this crate accepts.
pub const SUPPORTED_FORMAT_VERSION: u32 = 0;

/// Typed view of the `core` section.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CoreConfig {
    pub repository_format_version: u32,
    pub file_mode: bool,
    pub bare: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            repository_format_version: SUPPORTED_FORMAT_VERSION,
            file_mode: false,
            bare: false,
        }
    }
}

impl From<CoreConfig> for Config {
    fn from(core: CoreConfig) -> Self {
        let mut config = Config::default();
        config.set_unchecked(
            CORE,
            REPOSITORY_FORMAT_VERSION,
            core.repository_format_version.to_string(),
        );
        config.set_unchecked(CORE, FILE_MODE, core.file_mode.to_string());
        config.set_unchecked(CORE, BARE, core.bare.to_string());
        config
    }
}

/// An ordered set of configuration sections.
///
/// Section names and keys are matched without regard to ASCII case. Keys
/// are stored in lowercase.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    sections: Vec<Section>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, key: &str, value: String) {
        match self
            .entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            Some(index) => self.entries[index].1 = value,
            None => self.entries.push((key.to_ascii_lowercase(), value)),
        }
    }
}

impl Config {
    /// The configuration written into a freshly created repository:
    /// `repositoryformatversion = 0`, `filemode = false`, `bare = false`.
    pub fn new_repository() -> Self {
        CoreConfig::default().into()
    }

    /// Parse the text of a config file.
    pub fn parse(text: &str) -> Result<Self> {
        text.parse()
    }

    /// Read and parse the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Config::parse(&text)
    }

    /// Serialize this config to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }

    /// Return true if no section has been loaded or set.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Names of all sections, in file order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// Raw value of `key` in `section`, if present.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Set `key` in `section`, appending the section and key if necessary.
    /// An existing key keeps its position.
    ///
    /// Section names, keys, and values that would not read back unchanged
    /// from the saved file are rejected with [`Error::InvalidConfigValue`]
    /// and leave the config untouched.
    pub fn set<V: Into<String>>(&mut self, section: &str, key: &str, value: V) -> Result<()> {
        let value = value.into();

        if !is_valid_section_name(section) {
            return Err(invalid_value(section, key, section));
        }
        if !is_valid_key(key) {
            return Err(invalid_value(section, key, key));
        }
        if !is_valid_value(&value) {
            return Err(invalid_value(section, key, &value));
        }

        self.set_unchecked(section, key, value);
        Ok(())
    }

    /// Interpret `key` in `section` as a git boolean
    /// (`true`/`false`, `yes`/`no`, `on`/`off`, `1`/`0`).
    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>> {
        match self.get(section, key) {
            None => Ok(None),
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(Some(true)),
                "false" | "no" | "off" | "0" => Ok(Some(false)),
                _ => Err(invalid_value(section, key, value)),
            },
        }
    }

    /// Interpret `key` in `section` as a decimal integer.
    pub fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>> {
        match self.get(section, key) {
            None => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| invalid_value(section, key, value)),
        }
    }

    /// Return `core.repositoryformatversion` if it is one this crate supports.
    pub fn repository_format_version(&self) -> Result<u32> {
        let raw = self.get(CORE, REPOSITORY_FORMAT_VERSION).ok_or_else(|| {
            Error::MissingConfig(format!("{}.{}", CORE, REPOSITORY_FORMAT_VERSION))
        })?;

        match raw.parse::<i64>() {
            Ok(v) if v == i64::from(SUPPORTED_FORMAT_VERSION) => Ok(SUPPORTED_FORMAT_VERSION),
            _ => Err(Error::UnsupportedFormatVersion(raw.to_string())),
        }
    }

    /// Check that this config describes a repository this crate can open.
    ///
    /// Only `core.repositoryformatversion` is checked. Unknown keys are
    /// accepted so newer config files remain readable.
    pub fn validate(&self) -> Result<()> {
        self.repository_format_version().map(|_| ())
    }

    /// Typed view of the `core` section. Absent booleans read as `false`.
    pub fn core(&self) -> Result<CoreConfig> {
        Ok(CoreConfig {
            repository_format_version: self.repository_format_version()?,
            file_mode: self.get_bool(CORE, FILE_MODE)?.unwrap_or(false),
            bare: self.get_bool(CORE, BARE)?.unwrap_or(false),
        })
    }

    fn set_unchecked(&mut self, section: &str, key: &str, value: String) {
        let index = self.section_index_or_insert(section);
        self.sections[index].set(key, value);
    }

    fn section(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        match self
            .sections
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
        {
            Some(index) => index,
            None => {
                self.sections.push(Section {
                    name: name.to_string(),
                    entries: Vec::new(),
                });
                self.sections.len() - 1
            }
        }
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let mut config = Config::default();
        let mut current: Option<usize> = None;

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') {
                let close = line
                    .find(']')
                    .ok_or_else(|| parse_error(line_no, "unterminated section header"))?;

                // Only a comment may follow the header on the same line.
                let rest = line[close + 1..].trim_start();
                if !(rest.is_empty() || rest.starts_with('#') || rest.starts_with(';')) {
                    return Err(parse_error(line_no, "unexpected text after section header"));
                }

                let name = line[1..close].trim();
                if name.is_empty() {
                    return Err(parse_error(line_no, "empty section name"));
                }
                current = Some(config.section_index_or_insert(name));
                continue;
            }

            let section =
                current.ok_or_else(|| parse_error(line_no, "entry outside of any section"))?;

            // A key without a value is git's shorthand for `key = true`.
            let (key, value) = match line.find('=') {
                Some(eq) => (line[..eq].trim(), line[eq + 1..].trim()),
                None => (line, "true"),
            };
            if key.is_empty() {
                return Err(parse_error(line_no, "empty key"));
            }

            config.sections[section].set(key, value.to_string());
        }

        Ok(config)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, section) in self.sections.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{}]", section.name)?;
            for (key, value) in &section.entries {
                writeln!(f, "\t{} = {}", key, value)?;
            }
        }
        Ok(())
    }
}

fn is_valid_section_name(name: &str) -> bool {
    !name.is_empty()
        && name.trim() == name
        && !name.chars().any(|c| c.is_control() || c == '[' || c == ']')
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('#')
        && !key.starts_with(';')
        && !key
            .chars()
            .any(|c| c.is_control() || c.is_whitespace() || "=[]".contains(c))
}

// Values are trimmed when read back, and each entry lives on one line.
fn is_valid_value(value: &str) -> bool {
    value.trim() == value && !value.chars().any(|c| c.is_control() && c != '\t')
}

fn parse_error(line: usize, message: &str) -> Error {
    Error::ConfigParse {
        line,
        message: message.to_string(),
    }
}

fn invalid_value(section: &str, key: &str, value: &str) -> Error {
    Error::InvalidConfigValue {
        key: format!("{}.{}", section, key),
        value: value.to_string(),
    }
}

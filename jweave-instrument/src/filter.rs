//! Eligibility rules: which methods get a probe at all.

use std::io::{BufRead, BufReader};
use std::path::Path;

use jweave_model::{ClassModel, MethodModel};

use crate::config::InstrumentConfig;

/// Package and class-name blacklists.
///
/// A package entry starting with `.` matches anywhere in the package name;
/// any other entry is an exact prefix. Class entries are short-name prefixes.
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    pub packages: Vec<String>,
    pub classes: Vec<String>,
}

impl Blacklist {
    pub fn new(packages: Vec<String>, classes: Vec<String>) -> Blacklist {
        Blacklist { packages, classes }
    }

    pub fn empty() -> Blacklist {
        Blacklist::default()
    }

    /// Framework packages that are never instrumented.
    pub fn android_defaults() -> Blacklist {
        Blacklist::new(
            vec![
                "android.".to_string(),
                "androidx.".to_string(),
                "com.google.android".to_string(),
                "java.".to_string(),
                "kotlin.".to_string(),
            ],
            vec![],
        )
    }

    /// Load both lists from optional line-oriented files. A missing or
    /// unreadable file yields an empty list with a warning.
    pub fn from_files(packages: Option<&Path>, classes: Option<&Path>) -> Blacklist {
        Blacklist::new(load_list(packages), load_list(classes))
    }

    fn package_blocked(&self, package: &str) -> bool {
        self.packages.iter().any(|entry| {
            if entry.starts_with('.') {
                package.contains(entry.as_str())
            } else {
                package.starts_with(entry.as_str())
            }
        })
    }

    fn class_blocked(&self, short_name: &str) -> bool {
        self.classes
            .iter()
            .any(|entry| short_name.starts_with(entry.as_str()))
    }
}

fn load_list(path: Option<&Path>) -> Vec<String> {
    let Some(path) = path else {
        return Vec::new();
    };
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            log::warn!("cannot read blacklist {}: {e}", path.display());
            return Vec::new();
        }
    };
    BufReader::new(file)
        .lines()
        .map_while(|l| l.ok())
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect()
}

/// Whether a method is a candidate for instrumentation.
///
/// Rules, in order: blacklisted package, reserved resource class, blacklisted
/// class-name prefix, synthetic accessor marker. Side-effect-free.
pub fn is_eligible(
    class: &ClassModel,
    method: &MethodModel,
    blacklist: &Blacklist,
    config: &InstrumentConfig,
) -> bool {
    if blacklist.package_blocked(class.package_name()) {
        return false;
    }
    if class.short_name() == config.resource_class {
        return false;
    }
    if blacklist.class_blocked(class.short_name()) {
        return false;
    }
    !method.name.starts_with(&config.synthetic_prefix)
}

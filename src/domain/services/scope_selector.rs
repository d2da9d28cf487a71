#[cfg(test)]
#[path = "scope_selector_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Scope;

/// The set of scopes a user can pick from, and which one is active. Every
/// method that changes the selection reports the new scope only when it
/// actually differs from the old one.
pub struct ScopeSelector {
    available: Vec<Scope>,
    selected: usize,
}

impl ScopeSelector {
    pub fn new(available: Vec<Scope>, initial: &Scope) -> ScopeSelector {
        let mut available = available;
        if !available.contains(initial) {
            available.push(initial.clone());
        }

        let selected = available
            .iter()
            .position(|scope| return scope == initial)
            .unwrap_or_default();

        return ScopeSelector {
            available,
            selected,
        };
    }

    pub fn from_config() -> Result<ScopeSelector> {
        let mut available: Vec<Scope> = vec![];
        for id in Config::get(ConfigKey::Scopes).split(',') {
            if id.trim().is_empty() {
                continue;
            }

            let scope = Scope::parse(id);
            if !available.contains(&scope) {
                available.push(scope);
            }
        }

        if available.is_empty() {
            bail!("No scopes configured. Set `scopes` to a comma separated list, e.g. \"School,10-A\".");
        }

        let initial = Scope::parse(&Config::get(ConfigKey::Scope));
        return Ok(ScopeSelector::new(available, &initial));
    }

    pub fn current(&self) -> &Scope {
        return &self.available[self.selected];
    }

    pub fn available(&self) -> &[Scope] {
        return &self.available;
    }

    /// Selects a scope by identifier. Unknown identifiers are an error so the
    /// caller can tell the user what is available.
    pub fn select(&mut self, id: &str) -> Result<Option<Scope>> {
        let scope = Scope::parse(id);
        let idx = match self.available.iter().position(|e| return *e == scope) {
            Some(idx) => idx,
            None => bail!(format!(
                "Unknown scope {scope}. Available scopes are: {}",
                self.list()
            )),
        };

        return Ok(self.move_to(idx));
    }

    /// Cycles to the next scope, wrapping around.
    pub fn next(&mut self) -> Option<Scope> {
        let idx = (self.selected + 1) % self.available.len();
        return self.move_to(idx);
    }

    pub fn list(&self) -> String {
        return self
            .available
            .iter()
            .map(|scope| return scope.to_string())
            .collect::<Vec<String>>()
            .join(", ");
    }

    fn move_to(&mut self, idx: usize) -> Option<Scope> {
        if idx == self.selected {
            return None;
        }

        self.selected = idx;
        return Some(self.current().clone());
    }
}

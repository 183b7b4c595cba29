use crate::models::{Person, VisualizationSettings};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A family member together with its stored time-together settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    #[serde(flatten)]
    pub member: Person,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_visualization: Option<VisualizationSettings>,
}

/// Load/save pair for per-member settings.
pub trait SettingsStore {
    fn load(&self, member_id: &str) -> Result<Option<VisualizationSettings>>;
    fn save(&mut self, member_id: &str, settings: &VisualizationSettings) -> Result<()>;
}

/// Members and their settings as one pretty JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records; a missing file reads as empty.
    pub fn members(&self) -> Result<Vec<MemberRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let s = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        serde_json::from_str(&s).with_context(|| format!("parse {}", self.path.display()))
    }

    pub fn member(&self, id: &str) -> Result<MemberRecord> {
        self.members()?
            .into_iter()
            .find(|r| r.member.id == id)
            .with_context(|| format!("no family member with id {id:?}"))
    }

    pub fn add_member(&mut self, member: Person) -> Result<()> {
        let mut records = self.members()?;
        if records.iter().any(|r| r.member.id == member.id) {
            bail!("family member {:?} already exists", member.id);
        }
        records.push(MemberRecord {
            member,
            time_visualization: None,
        });
        self.write_all(&records)
    }

    /// Apply `f` to the settings slot of `id` and persist the result.
    pub fn update<T>(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut Option<VisualizationSettings>) -> T,
    ) -> Result<T> {
        let mut records = self.members()?;
        let record = records
            .iter_mut()
            .find(|r| r.member.id == id)
            .with_context(|| format!("no family member with id {id:?}"))?;
        let out = f(&mut record.time_visualization);
        self.write_all(&records)?;
        Ok(out)
    }

    fn write_all(&self, records: &[MemberRecord]) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let mut f =
            File::create(&self.path).with_context(|| format!("write {}", self.path.display()))?;
        let s = serde_json::to_string_pretty(records)?;
        f.write_all(s.as_bytes())?;
        Ok(())
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self, member_id: &str) -> Result<Option<VisualizationSettings>> {
        Ok(self.member(member_id)?.time_visualization)
    }

    fn save(&mut self, member_id: &str, settings: &VisualizationSettings) -> Result<()> {
        self.update(member_id, |slot| *slot = Some(settings.clone()))
    }
}

/// In-memory store, keyed by member id.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    settings: HashMap<String, VisualizationSettings>,
}

impl SettingsStore for MemoryStore {
    fn load(&self, member_id: &str) -> Result<Option<VisualizationSettings>> {
        Ok(self.settings.get(member_id).cloned())
    }

    fn save(&mut self, member_id: &str, settings: &VisualizationSettings) -> Result<()> {
        self.settings.insert(member_id.to_string(), settings.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VisualizationMode;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn person(id: &str) -> Person {
        Person {
            id: id.into(),
            name: "Sam".into(),
            birth_date: NaiveDate::from_ymd_opt(1985, 7, 4).unwrap(),
            together_since: NaiveDate::from_ymd_opt(2015, 9, 12).unwrap(),
        }
    }

    #[test]
    fn duplicate_member_is_rejected() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested").join("m.json"));
        store.add_member(person("sam")).unwrap();
        assert!(store.add_member(person("sam")).is_err());
        assert_eq!(store.members().unwrap().len(), 1);
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::default();
        assert!(store.load("sam").unwrap().is_none());
        let s = VisualizationSettings {
            enabled: true,
            has_confirmed_feature: true,
            mode: VisualizationMode::Milestone {
                label: "Wedding".into(),
                target_date: NaiveDate::from_ymd_opt(2027, 6, 5),
            },
        };
        store.save("sam", &s).unwrap();
        assert_eq!(store.load("sam").unwrap(), Some(s));
    }
}

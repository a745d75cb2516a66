use anyhow::{Context, Result, bail};
use pika_core::{Assignment, NotificationSettings, PlannerSettings};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// `$PIKA_HOME`, else `~/.pika`.
pub fn pika_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("PIKA_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set (or set PIKA_HOME)")?;
    Ok(PathBuf::from(home).join(".pika"))
}

pub fn ensure_pika_home() -> Result<PathBuf> {
    let dir = pika_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// JSON files under the pika home. Each file is rewritten whole on save.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn open() -> Result<Self> {
        Ok(Self::at(ensure_pika_home()?))
    }

    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn assignments_path(&self) -> PathBuf {
        self.dir.join("assignments.json")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join("settings.json")
    }

    pub fn notifications_path(&self) -> PathBuf {
        self.dir.join("notifications.json")
    }

    pub fn load_assignments(&self) -> Result<Vec<Assignment>> {
        read_json_or_default(&self.assignments_path())
    }

    pub fn save_assignments(&self, list: &[Assignment]) -> Result<()> {
        write_json(&self.assignments_path(), &list)
    }

    pub fn load_settings(&self) -> Result<PlannerSettings> {
        read_json_or_default(&self.settings_path())
    }

    pub fn save_settings(&self, settings: &PlannerSettings) -> Result<()> {
        write_json(&self.settings_path(), settings)
    }

    pub fn load_notifications(&self) -> Result<NotificationSettings> {
        read_json_or_default(&self.notifications_path())
    }

    pub fn save_notifications(&self, settings: &NotificationSettings) -> Result<()> {
        write_json(&self.notifications_path(), settings)
    }
}

/// Find one assignment by exact id or unique id prefix.
pub fn find_index(list: &[Assignment], id: &str) -> Result<usize> {
    if let Some(i) = list.iter().position(|a| a.id == id) {
        return Ok(i);
    }
    let hits: Vec<usize> = list
        .iter()
        .enumerate()
        .filter(|(_, a)| a.id.starts_with(id))
        .map(|(i, _)| i)
        .collect();
    match hits.as_slice() {
        [i] => Ok(*i),
        [] => bail!("no assignment with id '{id}'"),
        _ => bail!("id prefix '{id}' matches {} assignments", hits.len()),
    }
}

fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    if s.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "saved");
    Ok(())
}

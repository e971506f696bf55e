//! Registration store: registered players, saved clans and generated messages.
//!
//! Everything is held in memory. When a data directory is configured, every registration is
//! also appended to a plain-text roll file there (`<name> <level>` per line).

use crate::models::{
    Clan, ClanDescriptor, CwlMessage, NewRegistration, PlayerRegistration, RegistrationId,
};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the roll file inside the data directory.
pub const ROLL_FILE: &str = "listaIscrizioni.txt";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A required field was empty after trimming.
    #[error("Il campo {0} è obbligatorio")]
    EmptyField(&'static str),
    /// A clan was declared with zero participants.
    #[error("Il numero di partecipanti deve essere almeno 1")]
    ZeroCapacity,
    #[error("Errore di accesso ai file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Errore durante l'esportazione CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Default)]
pub struct RegistrationStore {
    registrations: Vec<PlayerRegistration>,
    index: HashMap<RegistrationId, usize>,
    clans: Vec<Clan>,
    messages: Vec<CwlMessage>,
    data_dir: Option<PathBuf>,
}

impl RegistrationStore {
    /// In-memory store with no roll file.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Store that mirrors registrations to `<data_dir>/listaIscrizioni.txt`. Creates the directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            data_dir: Some(data_dir),
            ..Self::default()
        })
    }

    /// Path of the roll file, if file mirroring is on.
    pub fn roll_file(&self) -> Option<PathBuf> {
        self.data_dir.as_deref().map(|d| d.join(ROLL_FILE))
    }

    /// Register a player. Name and level are trimmed and must not be empty.
    pub fn add_registration(
        &mut self,
        new: NewRegistration,
    ) -> Result<PlayerRegistration, StoreError> {
        let name = new.player_name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyField("player_name"));
        }
        let level = new.level_tag.trim();
        if level.is_empty() {
            return Err(StoreError::EmptyField("level_tag"));
        }

        let registration = PlayerRegistration::new(name, level);
        if let Some(path) = self.roll_file() {
            append_line(&path, &registration.display_line())?;
        }
        self.index.insert(registration.id, self.registrations.len());
        self.registrations.push(registration.clone());
        Ok(registration)
    }

    /// All registrations, in registration order.
    pub fn registrations(&self) -> &[PlayerRegistration] {
        &self.registrations
    }

    pub fn get(&self, id: RegistrationId) -> Option<&PlayerRegistration> {
        self.index.get(&id).map(|&i| &self.registrations[i])
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Truncate the roll file, then drop every registration. A failed truncate leaves both intact.
    pub fn clear_registrations(&mut self) -> Result<(), StoreError> {
        if let Some(path) = self.roll_file() {
            fs::write(path, "")?;
        }
        self.registrations.clear();
        self.index.clear();
        Ok(())
    }

    /// Save a clan for reuse. Name and league are trimmed and must not be empty.
    pub fn add_clan(&mut self, descriptor: ClanDescriptor) -> Result<Clan, StoreError> {
        let name = descriptor.name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyField("name"));
        }
        let league = descriptor.league_tier.trim();
        if league.is_empty() {
            return Err(StoreError::EmptyField("league_tier"));
        }
        if descriptor.capacity == 0 {
            return Err(StoreError::ZeroCapacity);
        }
        let clan = Clan::new(ClanDescriptor::new(name, descriptor.capacity, league));
        self.clans.push(clan.clone());
        Ok(clan)
    }

    pub fn clans(&self) -> &[Clan] {
        &self.clans
    }

    /// Keep a generated message in the history.
    pub fn save_message(&mut self, content: impl Into<String>) -> CwlMessage {
        let message = CwlMessage::new(content);
        self.messages.push(message.clone());
        message
    }

    pub fn messages(&self) -> &[CwlMessage] {
        &self.messages
    }

    pub fn latest_message(&self) -> Option<&CwlMessage> {
        self.messages.last()
    }

    /// Registrations as CSV: `player_name,level_tag,registered_at` (RFC 3339 timestamps).
    pub fn registrations_csv(&self) -> Result<String, StoreError> {
        let mut wtr = csv::WriterBuilder::new().from_writer(Vec::new());
        wtr.write_record(["player_name", "level_tag", "registered_at"])?;
        for r in &self.registrations {
            wtr.write_record([
                r.player_name.as_str(),
                r.level_tag.as_str(),
                r.registered_at.to_rfc3339().as_str(),
            ])?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| StoreError::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn append_line(path: &Path, line: &str) -> Result<(), StoreError> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

use std::path::{Path, PathBuf};

use omnichat_common::SessionId;
use tracing::{debug, warn};

use super::types::ChatSession;
use crate::{AiError, Message};

/// Session list backed by a JSON file.
#[derive(Debug)]
pub struct ChatHistory {
    path: PathBuf,
    sessions: Vec<ChatSession>,
    current: Option<SessionId>,
}

impl ChatHistory {
    /// Load history from `path`. A missing file yields an empty history; an
    /// unreadable or corrupt one is logged and also treated as empty.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let sessions = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Vec<ChatSession>>(&text) {
                Ok(sessions) => sessions,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "chat history is corrupt, starting empty");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read chat history");
                Vec::new()
            }
        };
        debug!(path = %path.display(), sessions = sessions.len(), "chat history loaded");
        Self {
            path,
            sessions,
            current: None,
        }
    }

    /// Default location: `<data dir>/omnichat/history.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("omnichat").join("history.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All sessions, newest first.
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn current_id(&self) -> Option<&SessionId> {
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&ChatSession> {
        let id = self.current.as_ref()?;
        self.sessions.iter().find(|s| &s.id == id)
    }

    /// Start a new session at the front of the list and make it current.
    pub fn create_session(&mut self, model: impl Into<String>) -> Result<&ChatSession, AiError> {
        let session = ChatSession::new(model);
        self.current = Some(session.id.clone());
        self.sessions.insert(0, session);
        self.save()?;
        Ok(&self.sessions[0])
    }

    /// Make `id` current. Unknown ids are accepted; [`Self::current`] then
    /// returns `None`.
    pub fn select(&mut self, id: &SessionId) {
        self.current = Some(id.clone());
    }

    /// Make the newest session for `model` current, creating one if none
    /// exists.
    pub fn resume_latest(&mut self, model: &str) -> Result<&ChatSession, AiError> {
        match self.sessions.iter().position(|s| s.model == model) {
            Some(index) => {
                self.current = Some(self.sessions[index].id.clone());
                Ok(&self.sessions[index])
            }
            None => self.create_session(model),
        }
    }

    /// Remove a session. Clears the current selection if it pointed there.
    pub fn delete(&mut self, id: &SessionId) -> Result<bool, AiError> {
        let before = self.sessions.len();
        self.sessions.retain(|s| &s.id != id);
        if self.current.as_ref() == Some(id) {
            self.current = None;
        }
        let removed = self.sessions.len() != before;
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    /// Replace the transcript of the current session. Returns `false` when
    /// nothing is current.
    pub fn update_current_messages(&mut self, messages: Vec<Message>) -> Result<bool, AiError> {
        let Some(id) = self.current.clone() else {
            return Ok(false);
        };
        let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) else {
            return Ok(false);
        };
        session.replace_messages(messages);
        self.save()?;
        Ok(true)
    }

    /// Write every session to disk (tmp file + rename).
    pub fn save(&self) -> Result<(), AiError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AiError::Storage(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(&self.sessions)
            .map_err(|e| AiError::Storage(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| AiError::Storage(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| AiError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::DEFAULT_TITLE;

    fn history() -> (tempfile::TempDir, ChatHistory) {
        let dir = tempfile::tempdir().unwrap();
        let history = ChatHistory::load(dir.path().join("history.json"));
        (dir, history)
    }

    #[test]
    fn missing_file_is_empty() {
        let (_dir, history) = history();
        assert!(history.sessions().is_empty());
        assert!(history.current().is_none());
    }

    #[test]
    fn corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(ChatHistory::load(&path).sessions().is_empty());
    }

    #[test]
    fn new_sessions_go_first_and_become_current() {
        let (_dir, mut history) = history();
        let first = history.create_session("gemini-api").unwrap().id.clone();
        let second = history.create_session("gemini-api").unwrap().id.clone();

        assert_eq!(history.sessions()[0].id, second);
        assert_eq!(history.sessions()[1].id, first);
        assert_eq!(history.current_id(), Some(&second));
        assert_eq!(history.current().unwrap().title, DEFAULT_TITLE);
    }

    #[test]
    fn update_titles_and_persists() {
        let (dir, mut history) = history();
        history.create_session("gemini-api").unwrap();
        let updated = history
            .update_current_messages(vec![
                Message::user("What is the airspeed of an unladen swallow?"),
                Message::assistant("African or European?"),
            ])
            .unwrap();
        assert!(updated);

        let reloaded = ChatHistory::load(dir.path().join("history.json"));
        let session = &reloaded.sessions()[0];
        assert_eq!(session.title, "What is the airspeed of an unl...");
        assert_eq!(session.messages.len(), 2);
        assert!(session.updated_at >= session.created_at);
    }

    #[test]
    fn update_without_current_is_a_no_op() {
        let (_dir, mut history) = history();
        assert!(!history.update_current_messages(vec![Message::user("hi")]).unwrap());
    }

    #[test]
    fn deleting_current_clears_selection() {
        let (_dir, mut history) = history();
        let keep = history.create_session("gemini-api").unwrap().id.clone();
        let gone = history.create_session("gemini-api").unwrap().id.clone();

        assert!(history.delete(&gone).unwrap());
        assert!(history.current().is_none());
        assert_eq!(history.sessions().len(), 1);

        history.select(&keep);
        assert!(!history.delete(&gone).unwrap());
        assert_eq!(history.current_id(), Some(&keep));
    }

    #[test]
    fn resume_latest_reuses_matching_session() {
        let (_dir, mut history) = history();
        let existing = history.create_session("gemini-api").unwrap().id.clone();
        history.create_session("other").unwrap();

        assert_eq!(history.resume_latest("gemini-api").unwrap().id, existing);
        assert_eq!(history.sessions().len(), 2);

        let fresh = history.resume_latest("unused").unwrap().id.clone();
        assert_eq!(history.sessions()[0].id, fresh);
    }
}

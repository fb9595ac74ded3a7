//! The resume editor session.
//!
//! A session owns the working copy of the form, the skills and the rendered
//! preview. Every user action runs the synchronization pass: re-render, then
//! flush the full resume to the store when a user is signed in.

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::editor::demo::{DEMO_FIELDS, DEMO_SKILLS};
use crate::editor::fields::{FieldId, FormValues};
use crate::editor::preview::Preview;
use crate::editor::skills::{AddSkillOutcome, SkillSet};
use crate::editor::view::{StatBoard, ViewSection, ViewState};
use crate::models::{UserId, UserRecord};
use crate::storage::{StoreError, UserStore};

/// What the persistence half of a synchronization pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    Saved,
    /// Nobody is signed in, so nothing was written.
    SkippedNoUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillChange<T> {
    pub result: T,
    /// `None` when the action was rejected before touching any state.
    pub sync: Option<SyncOutcome>,
}

#[derive(Debug)]
pub struct EditorSession {
    user: Option<UserId>,
    form: FormValues,
    skill_input: String,
    skills: SkillSet,
    preview: Preview,
    view: ViewState,
    stats: StatBoard,
}

impl EditorSession {
    /// A blank session: empty form, no skills, placeholder preview.
    pub fn new(user: Option<UserId>, initial_view: ViewSection) -> Self {
        let form = FormValues::default();
        let skills = SkillSet::default();
        let preview = Preview::render(&form, &skills);
        EditorSession {
            user,
            form,
            skill_input: String::new(),
            skills,
            preview,
            view: ViewState::starting_at(initial_view),
            stats: StatBoard::default(),
        }
    }

    /// Restore pass: loads the signed-in user's stored resume into the form
    /// and the skills, then renders.
    pub async fn restore(
        store: &dyn UserStore,
        user: Option<UserId>,
        initial_view: ViewSection,
    ) -> Result<Self, StoreError> {
        let mut session = EditorSession::new(user, initial_view);
        let Some(user) = session.user.clone() else {
            return Ok(session);
        };

        let record = store.get_user_data(&user).await?.unwrap_or_default();
        if let Some(resume) = &record.resume {
            session.form = FormValues::from_resume(resume);
            session.skills = SkillSet::from_stored(&resume.skills);
        }
        session.render();
        debug!(
            "Restored session for {user}: {} skills",
            session.skills.len()
        );
        Ok(session)
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    /// Form input event: applies the changed values, then synchronizes.
    pub async fn apply_input(
        &mut self,
        store: &dyn UserStore,
        changes: &[(FieldId, String)],
        skill_input: Option<String>,
    ) -> Result<SyncOutcome, StoreError> {
        for (field, value) in changes {
            self.form.set(*field, value.as_str());
        }
        if let Some(input) = skill_input {
            self.skill_input = input;
        }
        self.sync(store).await
    }

    pub fn set_skill_input(&mut self, value: impl Into<String>) {
        self.skill_input = value.into();
    }

    /// Adds the current skill input. Rejected input leaves the session
    /// untouched and skips the synchronization pass.
    pub async fn add_skill(
        &mut self,
        store: &dyn UserStore,
    ) -> Result<SkillChange<AddSkillOutcome>, StoreError> {
        let outcome = self.skills.add(&self.skill_input);
        if outcome != AddSkillOutcome::Added {
            debug!("Skill input rejected: {outcome:?}");
            return Ok(SkillChange {
                result: outcome,
                sync: None,
            });
        }
        self.skill_input.clear();
        let sync = self.sync(store).await?;
        Ok(SkillChange {
            result: outcome,
            sync: Some(sync),
        })
    }

    /// Skill tag click: drops every skill equal to the tag's text.
    pub async fn remove_skill(
        &mut self,
        store: &dyn UserStore,
        tag: &str,
    ) -> Result<SkillChange<usize>, StoreError> {
        let removed = self.skills.remove(tag);
        let sync = self.sync(store).await?;
        Ok(SkillChange {
            result: removed,
            sync: Some(sync),
        })
    }

    /// Overwrites every field and the skills with the demo resume, then
    /// synchronizes and reveals the editor.
    pub async fn populate_demo(&mut self, store: &dyn UserStore) -> Result<SyncOutcome, StoreError> {
        for (field, value) in DEMO_FIELDS {
            self.form.set(field, value);
        }
        self.skills.replace(&DEMO_SKILLS);
        let outcome = self.sync(store).await?;
        self.view.show(ViewSection::Editor);
        Ok(outcome)
    }

    pub fn show_editor(&mut self) {
        self.view.show(ViewSection::Editor);
    }

    pub fn show_landing(&mut self) {
        self.view.show(ViewSection::Landing);
    }

    /// Printable document of the current preview. Does not touch the model.
    pub fn print_document(&self) -> String {
        self.preview.to_print_document()
    }

    pub fn animate_stats(&mut self) -> usize {
        self.stats.animate()
    }

    /// Synchronization pass: re-render, then persist.
    pub async fn sync(&mut self, store: &dyn UserStore) -> Result<SyncOutcome, StoreError> {
        self.render();
        self.persist(store).await
    }

    fn render(&mut self) {
        self.preview = Preview::render(&self.form, &self.skills);
    }

    /// Fetch-or-create the user's record and overwrite its resume with the
    /// current form and skills.
    async fn persist(&self, store: &dyn UserStore) -> Result<SyncOutcome, StoreError> {
        let Some(user) = &self.user else {
            debug!("No current user; skipping save");
            return Ok(SyncOutcome::SkippedNoUser);
        };
        let mut record: UserRecord = store.get_user_data(user).await?.unwrap_or_default();
        record.resume = Some(self.form.to_resume(self.skills.as_slice()));
        store.save_user_data(user, &record).await?;
        debug!("Saved resume for {user}");
        Ok(SyncOutcome::Saved)
    }

    pub fn snapshot(&self, session_id: Uuid) -> SessionSnapshot {
        SessionSnapshot {
            session_id,
            user_id: self.user.clone(),
            fields: self.form.clone(),
            skill_input: self.skill_input.clone(),
            skills: self.skills.clone(),
            skill_tags_html: self.skills.render_tags(),
            preview: self.preview.clone(),
            preview_html: self.preview.to_html(),
            view: self.view.clone(),
            stats: self.stats.clone(),
        }
    }
}

#[cfg(test)]
impl EditorSession {
    pub fn form(&self) -> &FormValues {
        &self.form
    }

    pub fn skill_input(&self) -> &str {
        &self.skill_input
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }
}

/// Everything a front end needs to draw the session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub user_id: Option<UserId>,
    pub fields: FormValues,
    pub skill_input: String,
    pub skills: SkillSet,
    pub skill_tags_html: String,
    pub preview: Preview,
    pub preview_html: String,
    pub view: ViewState,
    pub stats: StatBoard,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResumeRecord;
    use crate::storage::InMemoryUserStore;
    use serde_json::json;

    fn user(id: &str) -> Option<UserId> {
        UserId::parse(id)
    }

    async fn stored_resume(store: &InMemoryUserStore, id: &str) -> ResumeRecord {
        store
            .get_user_data(&UserId::parse(id).unwrap())
            .await
            .unwrap()
            .and_then(|r| r.resume)
            .expect("resume should be stored")
    }

    #[tokio::test]
    async fn test_restore_without_user_is_blank() {
        let store = InMemoryUserStore::new();
        let session = EditorSession::restore(&store, None, ViewSection::Landing)
            .await
            .unwrap();
        assert!(session.skills().is_empty());
        assert_eq!(session.preview().name, "Your Name");
        assert_eq!(session.preview().summary, "");
        assert_eq!(session.view().visible(), Some(ViewSection::Landing));
    }

    #[tokio::test]
    async fn test_restore_loads_skills_in_order() {
        let store = InMemoryUserStore::new();
        let record = UserRecord {
            resume: Some(ResumeRecord {
                name: "Ada".to_string(),
                degree: "BSc".to_string(),
                skills: vec!["A".to_string(), "B".to_string()],
                ..Default::default()
            }),
            ..Default::default()
        };
        store
            .save_user_data(&UserId::parse("ada").unwrap(), &record)
            .await
            .unwrap();

        let session = EditorSession::restore(&store, user("ada"), ViewSection::Landing)
            .await
            .unwrap();
        assert_eq!(session.skills().as_slice(), ["A", "B"]);
        assert_eq!(session.skills().render_tags().matches("skill-tag").count(), 2);
        assert_eq!(session.form().get(FieldId::Name), "Ada");
        assert_eq!(session.preview().name, "Ada");
        assert_eq!(session.preview().education, "BSc");
        assert_eq!(session.preview().skills, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_restore_unknown_user_renders_placeholder() {
        let store = InMemoryUserStore::new();
        let session = EditorSession::restore(&store, user("ghost"), ViewSection::Landing)
            .await
            .unwrap();
        assert!(session.skills().is_empty());
        assert_eq!(session.preview().name, "Your Name");
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_round_trip_every_field() {
        let store = InMemoryUserStore::new();
        let mut session = EditorSession::new(user("ada"), ViewSection::Editor);

        let changes: Vec<(FieldId, String)> = FieldId::ALL
            .into_iter()
            .map(|f| (f, format!("{f} value")))
            .collect();
        session.apply_input(&store, &changes, None).await.unwrap();
        for skill in ["Rust", "Go", "SQL"] {
            session.set_skill_input(skill);
            session.add_skill(&store).await.unwrap();
        }

        let stored = stored_resume(&store, "ada").await;
        for (field, value) in &changes {
            assert_eq!(FormValues::from_resume(&stored).get(*field), value);
        }
        assert_eq!(stored.skills, vec!["Rust", "Go", "SQL"]);
    }

    #[tokio::test]
    async fn test_input_without_user_updates_preview_only() {
        let store = InMemoryUserStore::new();
        let mut session = EditorSession::new(None, ViewSection::Editor);

        let outcome = session
            .apply_input(&store, &[(FieldId::Name, "Ada".to_string())], None)
            .await
            .unwrap();
        assert_eq!(outcome, SyncOutcome::SkippedNoUser);
        assert_eq!(session.preview().name, "Ada");
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_add_skill_clears_input_and_saves() {
        let store = InMemoryUserStore::new();
        let mut session = EditorSession::new(user("ada"), ViewSection::Editor);
        session.set_skill_input("  Rust  ");

        let change = session.add_skill(&store).await.unwrap();
        assert_eq!(change.result, AddSkillOutcome::Added);
        assert_eq!(change.sync, Some(SyncOutcome::Saved));
        assert_eq!(session.skill_input(), "");
        assert_eq!(session.skills().as_slice(), ["Rust"]);
        assert_eq!(session.preview().skills, vec!["Rust"]);
        assert_eq!(stored_resume(&store, "ada").await.skills, vec!["Rust"]);
    }

    #[tokio::test]
    async fn test_duplicate_skill_is_a_no_op() {
        let store = InMemoryUserStore::new();
        let mut session = EditorSession::new(user("ada"), ViewSection::Editor);
        session.set_skill_input("Rust");
        session.add_skill(&store).await.unwrap();

        // Change the stored copy behind the session's back; a no-op add must
        // not overwrite it.
        let marker = UserRecord {
            extra: json!({ "marker": true }).as_object().unwrap().clone(),
            ..Default::default()
        };
        store
            .save_user_data(&UserId::parse("ada").unwrap(), &marker)
            .await
            .unwrap();

        session.set_skill_input("Rust");
        let change = session.add_skill(&store).await.unwrap();
        assert_eq!(change.result, AddSkillOutcome::Duplicate);
        assert_eq!(change.sync, None);
        assert_eq!(session.skill_input(), "Rust");
        assert_eq!(session.skills().as_slice(), ["Rust"]);

        let stored = store
            .get_user_data(&UserId::parse("ada").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(stored.resume.is_none());
    }

    #[tokio::test]
    async fn test_remove_skill_resyncs() {
        let store = InMemoryUserStore::new();
        let mut session = EditorSession::new(user("ada"), ViewSection::Editor);
        for skill in ["A", "B", "C"] {
            session.set_skill_input(skill);
            session.add_skill(&store).await.unwrap();
        }

        let change = session.remove_skill(&store, "B").await.unwrap();
        assert_eq!(change.result, 1);
        assert_eq!(session.skills().as_slice(), ["A", "C"]);
        assert_eq!(session.preview().skills, vec!["A", "C"]);
        assert_eq!(stored_resume(&store, "ada").await.skills, vec!["A", "C"]);
    }

    #[tokio::test]
    async fn test_save_preserves_other_user_keys() {
        let store = InMemoryUserStore::new();
        let id = UserId::parse("ada").unwrap();
        let existing = UserRecord {
            extra: json!({ "email": "ada@example.com" })
                .as_object()
                .unwrap()
                .clone(),
            ..Default::default()
        };
        store.save_user_data(&id, &existing).await.unwrap();

        let mut session = EditorSession::restore(&store, Some(id.clone()), ViewSection::Editor)
            .await
            .unwrap();
        session
            .apply_input(&store, &[(FieldId::Year, "2020".to_string())], None)
            .await
            .unwrap();

        let stored = store.get_user_data(&id).await.unwrap().unwrap();
        assert_eq!(stored.extra["email"], "ada@example.com");
        assert_eq!(stored.resume.unwrap().year, "2020");
    }

    #[tokio::test]
    async fn test_demo_population() {
        let store = InMemoryUserStore::new();
        let mut session = EditorSession::new(user("demo"), ViewSection::Landing);
        session.set_skill_input("leftover");

        let outcome = session.populate_demo(&store).await.unwrap();
        assert_eq!(outcome, SyncOutcome::Saved);
        assert_eq!(
            session.skills().as_slice(),
            ["JavaScript", "React", "Node.js", "Project Management"]
        );
        assert_eq!(session.form().get(FieldId::Name), "John Doe");
        assert_eq!(session.form().get(FieldId::Phone), "+1 (555) 123-4567");
        assert_eq!(session.form().get(FieldId::ExpOrg), "Tech Solutions Inc.");
        assert_eq!(
            session.preview().education,
            "Bachelor of Science in Computer Science from University of Technology, 2020 (CGPA: 3.8)"
        );
        assert_eq!(session.view().visible(), Some(ViewSection::Editor));

        let stored = stored_resume(&store, "demo").await;
        assert_eq!(stored.email, "john.doe@example.com");
        assert_eq!(stored.skills.len(), 4);
    }

    #[tokio::test]
    async fn test_print_does_not_touch_model() {
        let store = InMemoryUserStore::new();
        let mut session = EditorSession::new(user("ada"), ViewSection::Editor);
        session.populate_demo(&store).await.unwrap();
        let before = session.snapshot(Uuid::nil());

        let doc = session.print_document();
        assert!(doc.contains("John Doe"));
        assert!(doc.contains("<strong>Software Engineer</strong> at Tech Solutions Inc."));

        let after = session.snapshot(Uuid::nil());
        assert_eq!(before.preview, after.preview);
        assert_eq!(before.skills, after.skills);
    }
}

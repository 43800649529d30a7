use serde::{Deserialize, Serialize};

/// The id that sees and manages every event rather than its own slice.
pub const SUPER_ADMIN_ID: &str = "super-admin";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Organizer {
    pub id: String,
    pub username: String,
    pub name: String,
    pub logo_url: String,
    /// Never serialized back out; responses carry the profile only.
    #[serde(skip_serializing)]
    pub secret_id: String,
}

impl Organizer {
    pub fn is_super_admin(&self) -> bool {
        self.id == SUPER_ADMIN_ID
    }
}

/// Organizer credentials, loaded once from configuration. Usernames match
/// case-insensitively, secrets exactly.
#[derive(Debug, Clone, Default)]
pub struct OrganizerRegistry {
    organizers: Vec<Organizer>,
}

impl OrganizerRegistry {
    pub fn new(organizers: Vec<Organizer>) -> Self {
        Self { organizers }
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let organizers: Vec<Organizer> = serde_json::from_str(raw)?;
        Ok(Self::new(organizers))
    }

    pub fn authenticate(&self, username: &str, secret_id: &str) -> Option<&Organizer> {
        self.organizers
            .iter()
            .find(|org| org.username.eq_ignore_ascii_case(username) && org.secret_id == secret_id)
    }

    pub fn get(&self, id: &str) -> Option<&Organizer> {
        self.organizers.iter().find(|org| org.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.organizers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> OrganizerRegistry {
        OrganizerRegistry::from_json(
            r#"[
                {"id": "super-admin", "username": "root", "name": "Platform", "logoUrl": "https://img.example/p.png", "secretId": "s3cret"},
                {"id": "org-1", "username": "TCA", "name": "TCA Club", "logoUrl": "https://img.example/t.png", "secretId": "tca@2334"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn username_matches_case_insensitively() {
        let reg = registry();
        assert!(reg.authenticate("tca", "tca@2334").is_some());
        assert!(reg.authenticate("TCA", "tca@2334").is_some());
    }

    #[test]
    fn secret_matches_exactly() {
        let reg = registry();
        assert!(reg.authenticate("tca", "TCA@2334").is_none());
        assert!(reg.authenticate("tca", "").is_none());
    }

    #[test]
    fn super_admin_is_flagged() {
        let reg = registry();
        let org = reg.authenticate("root", "s3cret").unwrap();
        assert!(org.is_super_admin());
        assert!(!reg.get("org-1").unwrap().is_super_admin());
    }
}

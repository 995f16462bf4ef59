//! Request types accepted by the engines
//!
//! Requests are checked for shape with [`Validate`] before an engine sees
//! them. Engines assume a validated request and only enforce the rules that
//! need stored state (uniqueness, existence, staffing, access).

use std::collections::BTreeSet;
use std::sync::OnceLock;

use kage_domain::{Difficulty, MissionPatch, MissionStatus, NinjaId, Rank, RoleTag, VillageId};
use regex::Regex;
use shared::{KageError, Result};

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const PASSWORD_MIN_CHARS: usize = 8;
pub const PASSWORD_SPECIALS: &str = "@#$%^&+=.";

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

const EMAIL_MESSAGE: &str = "Email not valid";
const PASSWORD_MESSAGE: &str = "Password must contain a minimum of 8 characters, including a number, one uppercase letter, one lowercase letter and one special character";

/// Request shape checks
pub trait Validate {
    /// Every rule the request breaks, in field order
    fn violations(&self) -> Vec<String>;

    /// All violations at once as a single validation error
    fn validate(&self) -> Result<()> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(KageError::Validation(violations))
        }
    }
}

// ========== Missions ==========

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMissionRequest {
    pub title: String,
    pub description: String,
    pub reward: u32,
    pub difficulty: Difficulty,
    pub assignee_ids: Vec<NinjaId>,
}

impl Validate for CreateMissionRequest {
    fn violations(&self) -> Vec<String> {
        let mut out = Vec::new();
        check_title(&self.title, true, &mut out);
        check_description(&self.description, true, &mut out);
        if self.assignee_ids.is_empty() {
            out.push("Ninjas must be assigned to the mission".to_string());
        }
        out
    }
}

/// Partial mission update; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateMissionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub reward: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub assignee_ids: Option<Vec<NinjaId>>,
    pub status: Option<MissionStatus>,
}

impl UpdateMissionRequest {
    /// Status-only request, the one shape an assignee may send
    pub fn status(status: MissionStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn into_patch(self) -> MissionPatch {
        MissionPatch {
            title: self.title,
            description: self.description,
            reward: self.reward,
            difficulty: self.difficulty,
            assignees: self.assignee_ids.map(|ids| ids.into_iter().collect()),
            status: self.status,
        }
    }
}

impl Validate for UpdateMissionRequest {
    fn violations(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(title) = &self.title {
            check_title(title, true, &mut out);
        }
        if let Some(description) = &self.description {
            check_description(description, false, &mut out);
        }
        out
    }
}

// ========== Ninjas ==========

/// Self sign-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterNinjaRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub village_id: Option<VillageId>,
}

impl Validate for RegisterNinjaRequest {
    fn violations(&self) -> Vec<String> {
        let mut out = Vec::new();
        check_required(&self.name, "Name is required", &mut out);
        check_email(&self.email, &mut out);
        check_password(&self.password, &mut out);
        out
    }
}

/// Enlisting by a leader (also used to bootstrap an empty roster)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNinjaRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub rank: Rank,
    pub elite: bool,
    pub roles: BTreeSet<RoleTag>,
    pub village_id: Option<VillageId>,
}

impl Validate for CreateNinjaRequest {
    fn violations(&self) -> Vec<String> {
        let mut out = Vec::new();
        check_required(&self.name, "Name is required", &mut out);
        check_email(&self.email, &mut out);
        check_password(&self.password, &mut out);
        if self.roles.is_empty() {
            out.push("At least one role is required".to_string());
        }
        out
    }
}

/// What a ninja may change about themself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelfUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Validate for SelfUpdateRequest {
    fn violations(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(name) = &self.name {
            check_required(name, "Name cannot be blank", &mut out);
        }
        if let Some(email) = &self.email {
            check_email(email, &mut out);
        }
        if let Some(password) = &self.password {
            check_password(password, &mut out);
        }
        out
    }
}

/// What a leader may change about any ninja
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaderUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub rank: Option<Rank>,
    pub village_id: Option<VillageId>,
    pub elite: Option<bool>,
    pub roles: Option<BTreeSet<RoleTag>>,
}

impl Validate for LeaderUpdateRequest {
    fn violations(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(name) = &self.name {
            check_required(name, "Name cannot be blank", &mut out);
        }
        if let Some(email) = &self.email {
            check_email(email, &mut out);
        }
        if self.roles.as_ref().is_some_and(BTreeSet::is_empty) {
            out.push("At least one role is required".to_string());
        }
        out
    }
}

// ========== Villages ==========

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateVillageRequest {
    pub name: String,
    pub kage_id: NinjaId,
}

impl Validate for CreateVillageRequest {
    fn violations(&self) -> Vec<String> {
        let mut out = Vec::new();
        check_required(&self.name, "Name is required", &mut out);
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateVillageRequest {
    pub name: Option<String>,
    pub kage_id: Option<NinjaId>,
}

impl Validate for UpdateVillageRequest {
    fn violations(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(name) = &self.name {
            check_required(name, "Name cannot be blank", &mut out);
        }
        out
    }
}

// ========== Rules ==========

fn check_required(value: &str, message: &str, out: &mut Vec<String>) {
    if value.trim().is_empty() {
        out.push(message.to_string());
    }
}

fn check_title(title: &str, required: bool, out: &mut Vec<String>) {
    if required && title.trim().is_empty() {
        out.push("Title cannot be empty".to_string());
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        out.push(format!("Title cannot exceed {} characters", TITLE_MAX_CHARS));
    }
}

fn check_description(description: &str, required: bool, out: &mut Vec<String>) {
    if required && description.trim().is_empty() {
        out.push("Description cannot be empty".to_string());
    }
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        out.push(format!(
            "Description cannot exceed {} characters",
            DESCRIPTION_MAX_CHARS
        ));
    }
}

fn check_email(email: &str, out: &mut Vec<String>) {
    if email.trim().is_empty() {
        out.push("Email is required".to_string());
    } else if !is_valid_email(email) {
        out.push(EMAIL_MESSAGE.to_string());
    }
}

fn check_password(password: &str, out: &mut Vec<String>) {
    if password.is_empty() {
        out.push("Password is required".to_string());
    } else if !is_strong_password(password) {
        out.push(PASSWORD_MESSAGE.to_string());
    }
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}

pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_CHARS
        && !password.chars().any(char::is_whitespace)
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mission_request() -> CreateMissionRequest {
        CreateMissionRequest {
            title: "Escort the Bridge Builder".to_string(),
            description: "Protect Tazuna until the bridge is finished".to_string(),
            reward: 5000,
            difficulty: Difficulty::C,
            assignee_ids: vec![NinjaId::new(1)],
        }
    }

    #[test]
    fn test_valid_mission_request() {
        assert!(mission_request().validate().is_ok());
    }

    #[test]
    fn test_mission_violations_are_reported_together() {
        let request = CreateMissionRequest {
            title: "   ".to_string(),
            description: String::new(),
            assignee_ids: vec![],
            ..mission_request()
        };

        let err = request.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Title cannot be empty, Description cannot be empty, Ninjas must be assigned to the mission"
        );
    }

    #[test]
    fn test_title_length_limit() {
        let request = CreateMissionRequest {
            title: "x".repeat(TITLE_MAX_CHARS + 1),
            ..mission_request()
        };
        assert_eq!(
            request.violations(),
            vec!["Title cannot exceed 100 characters".to_string()]
        );

        let request = CreateMissionRequest {
            title: "x".repeat(TITLE_MAX_CHARS),
            ..mission_request()
        };
        assert!(request.violations().is_empty());
    }

    #[test]
    fn test_update_description_may_be_omitted_but_not_too_long() {
        assert!(UpdateMissionRequest::status(MissionStatus::Active)
            .validate()
            .is_ok());

        let request = UpdateMissionRequest {
            description: Some("y".repeat(DESCRIPTION_MAX_CHARS + 1)),
            ..UpdateMissionRequest::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_into_patch_keeps_absent_fields_absent() {
        let patch = UpdateMissionRequest {
            reward: Some(10),
            assignee_ids: Some(vec![NinjaId::new(2), NinjaId::new(2), NinjaId::new(1)]),
            ..UpdateMissionRequest::default()
        }
        .into_patch();

        assert_eq!(patch.reward, Some(10));
        assert_eq!(patch.assignees.map(|a| a.len()), Some(2));
        assert!(patch.title.is_none());
        assert!(patch.status.is_none());
    }

    #[test]
    fn test_email_rule() {
        assert!(is_valid_email("naruto@konoha.jp"));
        assert!(is_valid_email("kakashi.hatake+anbu@leaf.village.org"));
        assert!(!is_valid_email("naruto@konoha"));
        assert!(!is_valid_email("naruto konoha.jp"));
        assert!(!is_valid_email("@konoha.jp"));
    }

    #[test]
    fn test_password_rule() {
        assert!(is_strong_password("Ramen#2024"));
        assert!(!is_strong_password("Ramen#1"));
        assert!(!is_strong_password("ramen#2024"));
        assert!(!is_strong_password("RAMEN#2024"));
        assert!(!is_strong_password("Ramen2024"));
        assert!(!is_strong_password("Ramen #2024"));
        assert!(!is_strong_password("Ramen!2024"));
    }

    #[test]
    fn test_ninja_request_violations() {
        let request = CreateNinjaRequest {
            name: String::new(),
            email: "not-an-email".to_string(),
            password: "weak".to_string(),
            rank: Rank::Genin,
            elite: false,
            roles: BTreeSet::new(),
            village_id: None,
        };

        assert_eq!(
            request.violations(),
            vec![
                "Name is required".to_string(),
                EMAIL_MESSAGE.to_string(),
                PASSWORD_MESSAGE.to_string(),
                "At least one role is required".to_string(),
            ]
        );
    }

    #[test]
    fn test_partial_ninja_updates_only_check_present_fields() {
        assert!(SelfUpdateRequest::default().validate().is_ok());
        assert!(LeaderUpdateRequest::default().validate().is_ok());

        let request = LeaderUpdateRequest {
            roles: Some(BTreeSet::new()),
            ..LeaderUpdateRequest::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_village_name_required() {
        let request = CreateVillageRequest {
            name: " ".to_string(),
            kage_id: NinjaId::new(1),
        };
        assert_eq!(request.violations(), vec!["Name is required".to_string()]);
    }
}

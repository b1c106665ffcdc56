// src/models/account.rs

//! User account entities.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::utils::de;

/// Platform role, decoded from the numeric wire code.
///
/// Code 4 is an internal system role and is always excluded from user
/// statistics. Codes outside the known set decode to `Unknown`, which counts
/// toward totals but no per-role bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "i32", rename_all = "lowercase")]
pub enum Role {
    Admin,
    Lecturer,
    Student,
    Hod,
    System,
    #[default]
    Unknown,
}

impl From<i32> for Role {
    fn from(code: i32) -> Self {
        match code {
            0 => Role::Admin,
            1 => Role::Lecturer,
            2 => Role::Student,
            3 => Role::Hod,
            4 => Role::System,
            _ => Role::Unknown,
        }
    }
}

/// Gender, decoded from the numeric wire code (0 = male, 1 = female, else other).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "i32", rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl From<i32> for Gender {
    fn from(code: i32) -> Self {
        match code {
            0 => Gender::Male,
            1 => Gender::Female,
            _ => Gender::Other,
        }
    }
}

/// A platform account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,

    #[serde(default)]
    pub role: Role,

    #[serde(default)]
    pub gender: Gender,

    /// Date of birth; unparsable input decodes to `None`
    #[serde(default, deserialize_with = "de::lenient_date")]
    pub date_of_birth: Option<NaiveDate>,

    #[serde(default)]
    pub avatar: Option<String>,

    #[serde(default)]
    pub phone_number: Option<String>,
}

impl Account {
    /// Age in whole years as of `today`, when a date of birth is known.
    pub fn age(&self, today: NaiveDate) -> Option<i32> {
        let dob = self.date_of_birth?;
        let mut age = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        Some(age)
    }

    /// Whether the account carries a non-empty avatar reference.
    pub fn has_avatar(&self) -> bool {
        self.avatar.as_deref().is_some_and(|a| !a.trim().is_empty())
    }

    /// Whether the account carries a non-empty phone number.
    pub fn has_phone(&self) -> bool {
        self.phone_number
            .as_deref()
            .is_some_and(|p| !p.trim().is_empty())
    }
}
